// Device domain models
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

pub const CARD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Single-row device summary shown on the device view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub stop_count: u32,
    pub energy_wh: f64,
    pub active_sensors: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoppageEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl StoppageEvent {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole minutes between start and end, floored.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_seconds().div_euclid(60)
    }
}

/// Reporting period picked in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DeviceRange {
    pub fn from_parts(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            start: start_date.and_time(start_time),
            end: end_date.and_time(end_time),
        }
    }
}
