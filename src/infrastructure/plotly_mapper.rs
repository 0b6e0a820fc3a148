// Mapper to convert chart models into Plotly figure JSON
use crate::domain::dashboard::{BarHover, ChartData, ChartKind, SeriesData};
use serde_json::{json, Map, Value};

pub fn chart_to_figure(chart: &ChartData) -> Value {
    let data = match &chart.kind {
        ChartKind::HorizontalBar { labels, values, hover } => bar_traces(labels, values, hover),
        ChartKind::Line { x, series } => series.iter().map(|s| line_trace(x, s)).collect(),
    };

    json!({
        "data": data,
        "layout": layout(chart),
    })
}

fn bar_traces(labels: &[String], values: &[f64], hover: &[BarHover]) -> Vec<Value> {
    let customdata: Vec<[&str; 2]> = hover.iter().map(|h| [h.start.as_str(), h.end.as_str()]).collect();

    vec![json!({
        "type": "bar",
        "orientation": "h",
        "x": values,
        "y": labels,
        "text": values,
        "textposition": "auto",
        "marker": {
            "color": values,
            "colorscale": "Blues",
            "showscale": true,
            "colorbar": { "title": { "text": "Durée (min)" } },
        },
        "customdata": customdata,
        "hovertemplate": "Durée (min)=%{x}<br>Début arrêt=%{customdata[0]}<br>Fin arrêt=%{customdata[1]}<extra></extra>",
    })]
}

fn line_trace(x: &[String], series: &SeriesData) -> Value {
    let mut trace = json!({
        "type": "scatter",
        "mode": "lines",
        "name": series.name,
        "x": x,
        "y": series.values,
    });
    if let Some(color) = &series.color {
        trace["line"] = json!({ "color": color });
    }
    trace
}

fn layout(chart: &ChartData) -> Value {
    let mut layout = Map::new();
    layout.insert("autosize".into(), json!(true));

    if let Some(title) = &chart.title {
        layout.insert("title".into(), json!({ "text": title }));
    }
    if let Some(x_title) = &chart.x_title {
        layout.insert("xaxis".into(), json!({ "title": { "text": x_title } }));
    }

    let mut yaxis = Map::new();
    if let Some(y_title) = &chart.y_title {
        yaxis.insert("title".into(), json!({ "text": y_title }));
    }
    if matches!(chart.kind, ChartKind::HorizontalBar { .. }) {
        // first bar at the top
        yaxis.insert("autorange".into(), json!("reversed"));
        layout.insert("margin".into(), json!({ "l": 20, "r": 20, "t": 50, "b": 20 }));
    }
    if !yaxis.is_empty() {
        layout.insert("yaxis".into(), Value::Object(yaxis));
    }

    if let Some(height) = chart.height {
        layout.insert("height".into(), json!(height));
    }

    Value::Object(layout)
}
