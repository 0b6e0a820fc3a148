// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod html_renderer;
pub mod http_response;
pub mod memoized_repository;
pub mod plotly_mapper;
