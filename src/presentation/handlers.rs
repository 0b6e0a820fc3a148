// HTTP request handlers
use crate::domain::device::DeviceRange;
use crate::domain::production::Granularity;
use crate::domain::view::{MainSection, SubSection, View};
use crate::infrastructure::html_renderer::render_page;
use crate::infrastructure::http_response::html_response;
use crate::presentation::app_state::AppState;
use crate::presentation::error::AppError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;

/// Menu selections and sidebar inputs, all optional.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub section: Option<String>,
    pub sub: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub granularity: Option<String>,
}

impl ViewQuery {
    /// Resolve the view for this render pass. With no selection at all the
    /// menus' first entries apply; a dashboard without sub-section waits.
    pub fn resolve(&self, defaults: DeviceRange) -> Result<View, AppError> {
        let section = parse_slug(&self.section, "section", MainSection::from_slug)?;
        let sub = parse_slug(&self.sub, "sub", SubSection::from_slug)?;

        let view = match (section, sub) {
            (None, None) => View::Device(self.device_range(defaults)?),
            (None | Some(MainSection::Dashboard), Some(SubSection::Device)) => {
                View::Device(self.device_range(defaults)?)
            }
            (None | Some(MainSection::Dashboard), Some(SubSection::Production)) => {
                View::Production(self.granularity()?)
            }
            (Some(MainSection::Dashboard), None) => View::AwaitingSelection,
            (Some(MainSection::AddCard), _) => View::AddCard,
            (Some(MainSection::Kpi), _) => View::Kpi,
            (Some(MainSection::Employees), _) => View::Employees,
            (Some(MainSection::Configuration), _) => View::Configuration,
        };
        Ok(view)
    }

    pub fn device_range(&self, defaults: DeviceRange) -> Result<DeviceRange, AppError> {
        Ok(DeviceRange::from_parts(
            parse_date(&self.start_date, "start_date", defaults.start.date())?,
            parse_time(&self.start_time, "start_time", defaults.start.time())?,
            parse_date(&self.end_date, "end_date", defaults.end.date())?,
            parse_time(&self.end_time, "end_time", defaults.end.time())?,
        ))
    }

    pub fn granularity(&self) -> Result<Granularity, AppError> {
        parse_slug(&self.granularity, "granularity", Granularity::from_slug)
            .map(Option::unwrap_or_default)
    }
}

fn parse_slug<T>(
    value: &Option<String>,
    param: &'static str,
    from_slug: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, AppError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| from_slug(v).ok_or_else(|| AppError::bad_request(param, format!("unknown value {:?}", v))))
        .transpose()
}

fn parse_date(value: &Option<String>, param: &'static str, default: NaiveDate) -> Result<NaiveDate, AppError> {
    match value.as_deref() {
        None | Some("") => Ok(default),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request(param, format!("expected YYYY-MM-DD, got {:?}", v))),
    }
}

fn parse_time(value: &Option<String>, param: &'static str, default: NaiveTime) -> Result<NaiveTime, AppError> {
    match value.as_deref() {
        None | Some("") => Ok(default),
        Some(v) => NaiveTime::parse_from_str(v, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(v, "%H:%M:%S"))
            .map_err(|_| AppError::bad_request(param, format!("expected HH:MM, got {:?}", v))),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the dashboard page for the selected view
pub async fn dashboard_page(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let view = query.resolve(state.default_range)?;
    tracing::debug!("Rendering view {:?}", view);

    let dashboard = state.dashboard_service.build(&view).await?;
    Ok(match html_response(StatusCode::OK, render_page(&dashboard)) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    })
}

/// Device summary, range and stoppages as JSON
pub async fn device_data(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let report = match query.device_range(state.default_range) {
        Ok(range) => state.dashboard_service.device_report(range).await.map_err(AppError::from),
        Err(e) => Err(e),
    };
    match report {
        Ok(report) => Json(report).into_response(),
        Err(e) => e.into_json_response(),
    }
}

/// Production buckets, totals and raw records as JSON
pub async fn production_data(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let report = match query.granularity() {
        Ok(granularity) => state
            .dashboard_service
            .production_report(granularity)
            .await
            .map_err(AppError::from),
        Err(e) => Err(e),
    };
    match report {
        Ok(report) => Json(report).into_response(),
        Err(e) => e.into_json_response(),
    }
}
