// Presentation layer - HTTP state, handlers and routes
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod routes;
