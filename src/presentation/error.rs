// Request-level errors and their HTTP responses
use crate::application::dashboard_repository::DataError;
use crate::infrastructure::html_renderer::render_error_page;
use crate::infrastructure::http_response::html_response;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid parameter {param}: {message}")]
    BadRequest { param: &'static str, message: String },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl AppError {
    pub fn bad_request(param: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            param,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::BadRequest { .. } => tracing::debug!("Rejected request: {}", self),
            AppError::Data(e) => tracing::error!("Render pass aborted: {}", e),
        }
    }

    pub fn into_json_response(self) -> Response {
        self.log();
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        match html_response(self.status(), render_error_page(&self.to_string())) {
            Ok(response) => response,
            Err(status) => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::bad_request("granularity", "x").status(), StatusCode::BAD_REQUEST);

        let data = AppError::from(DataError::Io {
            path: PathBuf::from("production_data.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        assert_eq!(data.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(data.to_string().contains("production_data.json"));
    }
}
