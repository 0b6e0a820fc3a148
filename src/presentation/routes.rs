// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_page, device_data, health_check, production_data};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // A missing logo answers 404 and leaves a broken image on the page
    let logo = ServeFile::new(&state.logo_path);

    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/device", get(device_data))
        .route("/api/production", get(production_data))
        .route_service("/static/logo", logo)
        .route("/healthz", get(health_check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::domain::production::parse_timestamp;
    use crate::domain::device::DeviceRange;
    use crate::infrastructure::memoized_repository::MemoizedRepository;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::path::Path;
    use tower::ServiceExt;

    const PRODUCTION_JSON: &str = r#"[
        {"Date": "2025-06-01 08:05:00", "Quantité produite": 120, "Quantité rejetée": 4},
        {"Date": "2025-06-01 08:40:00", "Quantité produite": 110, "Quantité rejetée": 6},
        {"Date": "2025-06-01 09:10:00", "Quantité produite": 10, "Quantité rejetée": 30},
        {"Date": "2025-06-02 08:00:00", "Quantité produite": 90, "Quantité rejetée": 2}
    ]"#;

    fn test_router(production_file: &Path, logo_path: &Path) -> Router {
        let repository = Arc::new(MemoizedRepository::new(production_file));
        let state = Arc::new(AppState {
            dashboard_service: DashboardService::new(repository),
            default_range: DeviceRange {
                start: parse_timestamp("2025-06-01 08:00").unwrap(),
                end: parse_timestamp("2025-07-01 18:00").unwrap(),
            },
            logo_path: logo_path.to_path_buf(),
        });
        build_router(state)
    }

    fn fixture() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("production_data.json");
        std::fs::write(&data, PRODUCTION_JSON).unwrap();
        let router = test_router(&data, &dir.path().join("logo.png"));
        (dir, router)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (_dir, router) = fixture();
        let (status, body) = get(router, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_device_page_shows_cards_and_durations() {
        let (_dir, router) = fixture();
        let (status, body) = get(router, "/?section=dashboard&sub=device").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>📟 Dispositif</h1>"));
        assert!(body.contains(">2025-06-01 08:00</h3>"));
        assert!(body.contains(">234.7</h3>"));
        assert!(body.contains(r#""x":[45.0,40.0,45.0,30.0]"#));
        assert!(body.contains(r#""y":["Arrêt 1","Arrêt 2","Arrêt 3","Arrêt 4"]"#));
        assert!(body.contains(r#""autorange":"reversed""#));
    }

    #[tokio::test]
    async fn test_device_page_uses_picked_range() {
        let (_dir, router) = fixture();
        let (status, body) = get(
            router,
            "/?section=dashboard&sub=device&start_date=2025-06-05&start_time=06:30&end_date=2025-06-06&end_time=22:00",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(">2025-06-05 06:30</h3>"));
        assert!(body.contains(">2025-06-06 22:00</h3>"));
    }

    #[tokio::test]
    async fn test_production_page_by_hour() {
        let (_dir, router) = fixture();
        let (status, body) = get(router, "/?section=dashboard&sub=production&granularity=hour").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("📦 Statistiques selon heure"));
        assert!(body.contains(">330 unités</h3>"));
        assert!(body.contains(">42 unités</h3>"));
        assert!(body.contains(">288 unités</h3>"));
        assert!(body.contains("<td>2025-06-01 09:00</td><td>10</td><td>30</td><td>-20</td>"));
        assert!(body.contains("<option value=\"hour\" selected>Heure</option>"));
    }

    #[tokio::test]
    async fn test_awaiting_selection_renders_no_content() {
        let (_dir, router) = fixture();
        let (status, body) = get(router, "/?section=dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<h1>"));
        assert!(body.contains("Sous-section"));
    }

    #[tokio::test]
    async fn test_dashboard_menu_entry_opens_device_view() {
        let (_dir, router) = fixture();
        let (_, body) = get(router.clone(), "/?section=kpi").await;

        let entry = body
            .split("<a href=\"")
            .find(|a| a.contains(">🏠 Tableau de bord</a>"))
            .unwrap();
        let link = entry.split('"').next().unwrap().replace("&amp;", "&");
        assert_eq!(link, "/?section=dashboard&sub=device");

        let (status, body) = get(router, &link).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>📟 Dispositif</h1>"));
    }

    #[tokio::test]
    async fn test_placeholder_section() {
        let (_dir, router) = fixture();
        let (status, body) = get(router, "/?section=configuration").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>⚙️ Paramètres du système</h1>"));
    }

    #[tokio::test]
    async fn test_bad_parameters_are_rejected() {
        let (_dir, router) = fixture();
        let (status, _) = get(router.clone(), "/?section=reports").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(router, "/?sub=device&start_date=tomorrow").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("start_date"));
    }

    #[tokio::test]
    async fn test_missing_production_file_fails_only_that_view() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir.path().join("missing.json"), &dir.path().join("logo.png"));

        let (status, _) = get(router.clone(), "/?section=dashboard&sub=production").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = get(router, "/?section=dashboard&sub=device").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_device_api() {
        let (_dir, router) = fixture();
        let (status, body) = get(router, "/api/device").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let durations: Vec<i64> = json["stoppages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["duration_minutes"].as_i64().unwrap())
            .collect();
        assert_eq!(durations, vec![45, 40, 45, 30]);
        assert_eq!(json["summary"]["stop_count"], 4);
    }

    #[tokio::test]
    async fn test_production_api_by_day() {
        let (_dir, router) = fixture();
        let (status, body) = get(router.clone(), "/api/production?granularity=day").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["granularity"], "day");
        assert_eq!(json["buckets"].as_array().unwrap().len(), 2);
        assert_eq!(json["totals"]["produced"], 330.0);
        assert_eq!(json["records"].as_array().unwrap().len(), 4);

        let (status, body) = get(router.clone(), "/api/production?granularity=").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["granularity"], "day");

        let (status, body) = get(router, "/api/production?granularity=week").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("granularity"));
    }

    #[tokio::test]
    async fn test_logo_served_or_missing() {
        let (dir, router) = fixture();
        let (status, _) = get(router, "/static/logo").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let logo = dir.path().join("logo.svg");
        std::fs::write(&logo, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
        let router = test_router(&dir.path().join("production_data.json"), &logo);
        let response = router
            .oneshot(Request::builder().uri("/static/logo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/svg+xml");
    }
}
