// HTTP response utilities for HTML pages
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};

/// Build a `text/html` response with an explicit length
pub fn html_response(status: StatusCode, html: String) -> Result<Response<Body>, StatusCode> {
    let length = HeaderValue::from(html.len());
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CONTENT_LENGTH, length)
        .body(Body::from(html))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_response_headers() {
        let response = html_response(StatusCode::OK, "<p>é</p>".to_string()).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "9");
    }
}
