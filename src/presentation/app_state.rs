// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::domain::device::DeviceRange;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub default_range: DeviceRange,
    pub logo_path: PathBuf,
}
