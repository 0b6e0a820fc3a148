// Application layer - use cases over the repository
pub mod dashboard_repository;
pub mod dashboard_service;
