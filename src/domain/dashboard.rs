// Dashboard domain model: what a render pass produces
use super::view::View;

pub const DEFAULT_CARD_FOREGROUND: &str = "#FFFFFF";

/// A titled, colored metric tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub value: String,
    pub background: String,
    pub foreground: String,
}

impl Card {
    pub fn new(title: impl Into<String>, value: impl ToString, background: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.to_string(),
            background: background.into(),
            foreground: DEFAULT_CARD_FOREGROUND.to_string(),
        }
    }

    pub fn with_foreground(mut self, foreground: impl Into<String>) -> Self {
        self.foreground = foreground.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarHover {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub name: String,
    pub color: Option<String>,
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new(name: impl Into<String>, color: Option<&str>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color: color.map(str::to_string),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// One bar per label, first label drawn at the top.
    HorizontalBar {
        labels: Vec<String>,
        values: Vec<f64>,
        hover: Vec<BarHover>,
    },
    Line {
        x: Vec<String>,
        series: Vec<SeriesData>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: String,
    pub heading: String,
    pub title: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub height: Option<u32>,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub summary: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Fully shaped content for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub view: View,
    pub title: Option<String>,
    pub info: Option<String>,
    pub subheader: Option<String>,
    /// Cards laid out column by column.
    pub columns: Vec<Vec<Card>>,
    pub charts: Vec<ChartData>,
    pub tables: Vec<DataTable>,
}

impl Dashboard {
    pub fn empty(view: View) -> Self {
        Self {
            view,
            title: None,
            info: None,
            subheader: None,
            columns: Vec::new(),
            charts: Vec::new(),
            tables: Vec::new(),
        }
    }
}
