// Domain layer - records, buckets, view state and widgets
pub mod dashboard;
pub mod device;
pub mod production;
pub mod view;
