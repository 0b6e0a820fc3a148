// Dashboard service - Use case for building one view per render pass
use crate::application::dashboard_repository::{DashboardRepository, DataError};
use crate::domain::dashboard::{BarHover, Card, ChartData, ChartKind, Dashboard, DataTable, SeriesData};
use crate::domain::device::{DeviceRange, DeviceSummary, CARD_TIMESTAMP_FORMAT};
use crate::domain::production::{
    aggregate, format_quantity, Granularity, ProductionAggregate, ProductionRecord, ProductionTotals,
};
use crate::domain::view::View;
use serde::Serialize;
use std::sync::Arc;

const PRODUCED: &str = "Quantité produite";
const REJECTED: &str = "Quantité rejetée";
const RAW: &str = "Quantité brute";

#[derive(Debug, Clone, Serialize)]
pub struct StoppageRow {
    pub label: String,
    pub start: String,
    pub end: String,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub range: DeviceRange,
    pub summary: DeviceSummary,
    pub stoppages: Vec<StoppageRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionReport {
    pub granularity: Granularity,
    pub buckets: Vec<ProductionAggregate>,
    pub totals: ProductionTotals,
    pub records: Arc<Vec<ProductionRecord>>,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DashboardRepository>) -> Self {
        Self { repository }
    }

    pub async fn device_report(&self, range: DeviceRange) -> Result<DeviceReport, DataError> {
        let summary = self.repository.device_summary().await?;
        let events = self.repository.stoppage_events().await?;

        let stoppages = events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                if event.end < event.start {
                    tracing::warn!("Stoppage {} ends before it starts", i + 1);
                }
                StoppageRow {
                    label: format!("Arrêt {}", i + 1),
                    start: event.start.format(CARD_TIMESTAMP_FORMAT).to_string(),
                    end: event.end.format(CARD_TIMESTAMP_FORMAT).to_string(),
                    duration_minutes: event.duration_minutes(),
                }
            })
            .collect();

        Ok(DeviceReport {
            range,
            summary: (*summary).clone(),
            stoppages,
        })
    }

    pub async fn production_report(&self, granularity: Granularity) -> Result<ProductionReport, DataError> {
        let records = self.repository.production_records().await?;
        let buckets = aggregate(&records, granularity);
        let totals = ProductionTotals::from_buckets(&buckets);

        tracing::debug!(
            "Aggregated {} production records into {} {} buckets",
            records.len(),
            buckets.len(),
            granularity.slug()
        );

        Ok(ProductionReport {
            granularity,
            buckets,
            totals,
            records,
        })
    }

    /// Build the content for `view`. Only the two dashboard views touch data.
    pub async fn build(&self, view: &View) -> Result<Dashboard, DataError> {
        match view {
            View::Device(range) => Ok(device_dashboard(self.device_report(*range).await?)),
            View::Production(granularity) => {
                Ok(production_dashboard(self.production_report(*granularity).await?))
            }
            View::AwaitingSelection => Ok(Dashboard::empty(view.clone())),
            View::AddCard | View::Kpi | View::Employees | View::Configuration => {
                let mut dashboard = Dashboard::empty(view.clone());
                if let Some((title, info)) = view.placeholder() {
                    dashboard.title = Some(title.to_string());
                    dashboard.info = Some(info.to_string());
                }
                Ok(dashboard)
            }
        }
    }
}

fn device_dashboard(report: DeviceReport) -> Dashboard {
    let DeviceReport { range, summary, stoppages } = report;

    let columns = vec![
        vec![
            Card::new("📅 Début période", range.start.format(CARD_TIMESTAMP_FORMAT), "#0000FF"),
            Card::new("⚠️ Nombre d'arrêts", summary.stop_count, "#FF4500"),
        ],
        vec![
            Card::new("📆 Fin période", range.end.format(CARD_TIMESTAMP_FORMAT), "#20B2AA"),
            Card::new("⚡ Énergie consommée (Wh)", summary.energy_wh, "#FFD700").with_foreground("#000000"),
        ],
        vec![Card::new("🟢 Nb capteurs actifs", summary.active_sensors, "#228B22")],
    ];

    let chart = ChartData {
        id: "stoppage-durations".to_string(),
        heading: "📊 Durées des arrêts (en minutes)".to_string(),
        title: Some("Durée de chaque arrêt (en minutes)".to_string()),
        x_title: Some("Durée (minutes)".to_string()),
        y_title: Some("Arrêts".to_string()),
        height: Some(400),
        kind: ChartKind::HorizontalBar {
            labels: stoppages.iter().map(|s| s.label.clone()).collect(),
            values: stoppages.iter().map(|s| s.duration_minutes as f64).collect(),
            hover: stoppages
                .into_iter()
                .map(|s| BarHover { start: s.start, end: s.end })
                .collect(),
        },
    };

    Dashboard {
        title: Some("📟 Dispositif".to_string()),
        columns,
        charts: vec![chart],
        ..Dashboard::empty(View::Device(range))
    }
}

fn production_dashboard(report: ProductionReport) -> Dashboard {
    let ProductionReport { granularity, buckets, totals, records } = report;
    let units = |value: f64| format!("{} unités", format_quantity(value));

    let columns = vec![
        vec![Card::new("📈 Quantité produite", units(totals.produced), "#4682B4")],
        vec![Card::new("❌ Quantité rejetée", units(totals.rejected), "#DC143C")],
        vec![Card::new("🧮 Quantité brute", units(totals.raw), "#2E8B57")],
    ];

    let x: Vec<String> = buckets.iter().map(|b| granularity.format_bucket(b.bucket)).collect();
    let chart = ChartData {
        id: "production-quantities".to_string(),
        heading: "📊 Évolution des quantités".to_string(),
        title: None,
        x_title: None,
        y_title: None,
        height: None,
        kind: ChartKind::Line {
            x: x.clone(),
            series: vec![
                SeriesData::new(PRODUCED, None, buckets.iter().map(|b| b.produced).collect()),
                SeriesData::new(REJECTED, None, buckets.iter().map(|b| b.rejected).collect()),
                SeriesData::new(RAW, None, buckets.iter().map(|b| b.raw).collect()),
            ],
        },
    };

    let grouped = DataTable {
        summary: "📄 Voir les données regroupées".to_string(),
        columns: ["Date temps", PRODUCED, REJECTED, RAW].map(String::from).to_vec(),
        rows: x
            .into_iter()
            .zip(&buckets)
            .map(|(label, b)| {
                vec![
                    label,
                    format_quantity(b.produced),
                    format_quantity(b.rejected),
                    format_quantity(b.raw),
                ]
            })
            .collect(),
    };

    let raw = DataTable {
        summary: "📁 Voir les données brutes".to_string(),
        columns: ["Date", PRODUCED, REJECTED].map(String::from).to_vec(),
        rows: records
            .iter()
            .map(|r| {
                vec![
                    r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    format_quantity(r.produced),
                    format_quantity(r.rejected),
                ]
            })
            .collect(),
    };

    Dashboard {
        title: Some("🏭 Production de blister".to_string()),
        subheader: Some(format!("📦 Statistiques selon {}", granularity.label().to_lowercase())),
        columns,
        charts: vec![chart],
        tables: vec![grouped, raw],
        ..Dashboard::empty(View::Production(granularity))
    }
}
