// Memoized repository: constants plus one JSON file, each loaded once per process
use crate::application::dashboard_repository::{DashboardRepository, DataError};
use crate::domain::device::{DeviceSummary, StoppageEvent};
use crate::domain::production::{parse_timestamp, ProductionRecord};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

const STOPPAGES: [(&str, &str); 4] = [
    ("2025-06-03 08:15", "2025-06-03 09:00"),
    ("2025-06-08 14:30", "2025-06-08 15:10"),
    ("2025-06-15 09:00", "2025-06-15 09:45"),
    ("2025-06-25 11:45", "2025-06-25 12:15"),
];

#[derive(Debug, Deserialize)]
struct RawProductionRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Quantité produite", default)]
    produced: Option<f64>,
    #[serde(rename = "Quantité rejetée", default)]
    rejected: Option<f64>,
}

pub struct MemoizedRepository {
    production_file: PathBuf,
    device_summary: OnceCell<Arc<DeviceSummary>>,
    stoppage_events: OnceCell<Arc<Vec<StoppageEvent>>>,
    production_records: OnceCell<Arc<Vec<ProductionRecord>>>,
}

impl MemoizedRepository {
    pub fn new(production_file: impl Into<PathBuf>) -> Self {
        Self {
            production_file: production_file.into(),
            device_summary: OnceCell::new(),
            stoppage_events: OnceCell::new(),
            production_records: OnceCell::new(),
        }
    }

    fn build_stoppages() -> Result<Vec<StoppageEvent>, DataError> {
        let parse = |index: usize, value: &str| {
            parse_timestamp(value).ok_or_else(|| DataError::Timestamp {
                index,
                value: value.to_string(),
            })
        };
        STOPPAGES
            .into_iter()
            .enumerate()
            .map(|(i, (start, end))| Ok(StoppageEvent::new(parse(i, start)?, parse(i, end)?)))
            .collect()
    }

    async fn read_production_file(path: &Path) -> Result<Vec<ProductionRecord>, DataError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_production_json(path, &bytes)
    }
}

fn parse_production_json(path: &Path, bytes: &[u8]) -> Result<Vec<ProductionRecord>, DataError> {
    let raw: Vec<RawProductionRecord> =
        serde_json::from_slice(bytes).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    raw.into_iter()
        .enumerate()
        .map(|(index, r)| {
            let timestamp = parse_timestamp(&r.date).ok_or_else(|| DataError::Timestamp {
                index,
                value: r.date.clone(),
            })?;
            Ok(ProductionRecord {
                timestamp,
                produced: r.produced.unwrap_or(0.0),
                rejected: r.rejected.unwrap_or(0.0),
            })
        })
        .collect()
}

#[async_trait]
impl DashboardRepository for MemoizedRepository {
    async fn device_summary(&self) -> Result<Arc<DeviceSummary>, DataError> {
        let summary = self
            .device_summary
            .get_or_init(|| async {
                Arc::new(DeviceSummary {
                    stop_count: 4,
                    energy_wh: 234.7,
                    active_sensors: 7,
                })
            })
            .await;
        Ok(summary.clone())
    }

    async fn stoppage_events(&self) -> Result<Arc<Vec<StoppageEvent>>, DataError> {
        let events = self
            .stoppage_events
            .get_or_try_init(|| async { Self::build_stoppages().map(Arc::new) })
            .await?;
        Ok(events.clone())
    }

    async fn production_records(&self) -> Result<Arc<Vec<ProductionRecord>>, DataError> {
        let records = self
            .production_records
            .get_or_try_init(|| async {
                let records = Self::read_production_file(&self.production_file)
                    .await
                    .inspect_err(|e| tracing::warn!("Production data unavailable: {}", e))?;
                tracing::info!(
                    "Loaded {} production records from {}",
                    records.len(),
                    self.production_file.display()
                );
                Ok::<_, DataError>(Arc::new(records))
            })
            .await?;
        Ok(records.clone())
    }
}
