// Repository trait for dashboard data access
use crate::domain::device::{DeviceSummary, StoppageEvent};
use crate::domain::production::ProductionRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unparsable timestamp {value:?} in record {index}")]
    Timestamp { index: usize, value: String },
}

/// Providers behind the dashboard views. Results are shared: callers
/// get the same data on every call for the life of the repository.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn device_summary(&self) -> Result<Arc<DeviceSummary>, DataError>;

    async fn stoppage_events(&self) -> Result<Arc<Vec<StoppageEvent>>, DataError>;

    async fn production_records(&self) -> Result<Arc<Vec<ProductionRecord>>, DataError>;
}
