// Blister production domain models and bucketing
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionRecord {
    pub timestamp: NaiveDateTime,
    pub produced: f64,
    pub rejected: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Hour,
}

impl Granularity {
    pub const ALL: [Granularity; 2] = [Granularity::Day, Granularity::Hour];

    pub fn slug(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Hour => "hour",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Day => "Jour",
            Granularity::Hour => "Heure",
        }
    }

    /// Start of the bucket holding `ts`. Timestamps are naive wall-clock
    /// values, so no time zone is involved.
    pub fn bucket(self, ts: NaiveDateTime) -> NaiveDateTime {
        match self {
            Granularity::Day => ts.date().and_time(NaiveTime::MIN),
            Granularity::Hour => ts
                .date()
                .and_hms_opt(ts.hour(), 0, 0)
                .unwrap_or(ts),
        }
    }

    pub fn format_bucket(self, bucket: NaiveDateTime) -> String {
        match self {
            Granularity::Day => bucket.format("%Y-%m-%d").to_string(),
            Granularity::Hour => bucket.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionAggregate {
    pub bucket: NaiveDateTime,
    pub produced: f64,
    pub rejected: f64,
    /// produced - rejected, may be negative
    pub raw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProductionTotals {
    pub produced: f64,
    pub rejected: f64,
    pub raw: f64,
}

impl ProductionTotals {
    pub fn from_buckets(buckets: &[ProductionAggregate]) -> Self {
        buckets.iter().fold(Self::default(), |acc, b| Self {
            produced: acc.produced + b.produced,
            rejected: acc.rejected + b.rejected,
            raw: acc.raw + b.raw,
        })
    }
}

/// Sum produced and rejected quantities per bucket, in increasing bucket order.
pub fn aggregate(records: &[ProductionRecord], granularity: Granularity) -> Vec<ProductionAggregate> {
    let mut sums: BTreeMap<NaiveDateTime, (f64, f64)> = BTreeMap::new();
    for record in records {
        let entry = sums.entry(granularity.bucket(record.timestamp)).or_default();
        entry.0 += record.produced;
        entry.1 += record.rejected;
    }

    sums.into_iter()
        .map(|(bucket, (produced, rejected))| ProductionAggregate {
            bucket,
            produced,
            rejected,
            raw: produced - rejected,
        })
        .collect()
}

/// Parse a record timestamp. Offsets are dropped and the written wall-clock kept.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.naive_local());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Quantities print without a fractional part when they are whole.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
