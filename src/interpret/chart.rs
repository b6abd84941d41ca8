use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::interpret::extract::{DataPoint, PointSource};
use crate::interpret::payload::StructuredPayload;
use crate::interpret::InterpretOptions;

/// A chart is never drawn for fewer points than this.
pub const MIN_CHART_POINTS: usize = 2;

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Pie,
    Line,
}

impl ChartType {
    /// Resolve a declared visualization type. Non-chart kinds such as
    /// `table`, and anything unrecognised, resolve to `None`.
    pub fn from_declared(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bar" | "column" => Some(Self::Bar),
            "pie" | "donut" => Some(Self::Pie),
            "line" => Some(Self::Line),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Line => "line",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Currency,
    #[serde(other)]
    Plain,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

impl ChartConfig {
    /// Axis captions and value format used for charts built on this side.
    pub fn for_type(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Bar => Self {
                x_label: Some("Kategori/Bulan".to_string()),
                y_label: Some("Jumlah (Rp)".to_string()),
                format: Some(ValueFormat::Currency),
            },
            ChartType::Line => Self {
                x_label: Some("Periode".to_string()),
                y_label: Some("Jumlah (Rp)".to_string()),
                format: Some(ValueFormat::Currency),
            },
            ChartType::Pie => Self {
                x_label: None,
                y_label: None,
                format: Some(ValueFormat::Currency),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ChartConfig>,
}

impl ChartSpec {
    pub fn from_points(chart_type: ChartType, points: &[DataPoint], palette: &[String]) -> Self {
        let colors = match chart_type {
            ChartType::Pie => palette_colors(palette, points.len()),
            ChartType::Bar | ChartType::Line => None,
        };
        Self {
            chart_type,
            labels: points.iter().map(|p| p.label.clone()).collect(),
            values: points.iter().map(|p| p.value).collect(),
            colors,
            config: Some(ChartConfig::for_type(chart_type)),
        }
    }

    /// Read a backend `metadata.visualization` object. Returns `None` when
    /// the object is malformed or declares a non-chart type.
    pub fn from_backend(value: &Value) -> Option<Self> {
        let viz: BackendVisualization = match serde_json::from_value(value.clone()) {
            Ok(viz) => viz,
            Err(err) => {
                debug!(error = %err, "ignoring malformed backend visualization");
                return None;
            }
        };
        let Some(chart_type) = ChartType::from_declared(&viz.kind) else {
            debug!(kind = %viz.kind, "backend visualization is not a chart");
            return None;
        };
        let data: BackendChartData = match serde_json::from_value(viz.data) {
            Ok(data) => data,
            Err(err) => {
                debug!(error = %err, "backend visualization data has no labels/values");
                return None;
            }
        };
        Some(Self {
            chart_type,
            labels: data.labels,
            values: data.values,
            colors: data.colors,
            config: viz.config,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels and values line up and there are enough of them to draw.
    pub fn is_chartable(&self, min_points: usize) -> bool {
        self.labels.len() == self.values.len() && self.labels.len() >= min_points.max(MIN_CHART_POINTS)
    }
}

#[derive(Debug, Deserialize)]
struct BackendVisualization {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    config: Option<ChartConfig>,
}

#[derive(Debug, Deserialize)]
struct BackendChartData {
    labels: Vec<String>,
    values: Vec<f64>,
    #[serde(default)]
    colors: Option<Vec<String>>,
}

/// Outcome of chart selection: at most one chart, and a textual hint only
/// when no chart could be built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartDecision {
    pub chart: Option<ChartSpec>,
    pub hint: Option<String>,
}

pub fn select_chart(
    structured: Option<&StructuredPayload>,
    points: &[DataPoint],
    source: PointSource,
    backend_viz: Option<&Value>,
    options: &InterpretOptions,
) -> ChartDecision {
    let min_points = options.min_points();

    if let Some(spec) = backend_viz.and_then(ChartSpec::from_backend) {
        if spec.is_chartable(min_points) {
            debug!(chart = spec.chart_type.as_str(), points = spec.len(), "using backend visualization");
            return ChartDecision { chart: Some(spec), hint: None };
        }
        debug!(points = spec.len(), "backend visualization has too few aligned points");
    }

    if points.len() >= min_points {
        let chart_type = match source {
            PointSource::TopCategories => ChartType::Pie,
            PointSource::Prose => match structured.and_then(|s| s.visualization_type) {
                Some(ChartType::Line) => ChartType::Line,
                _ => ChartType::Bar,
            },
        };
        debug!(chart = chart_type.as_str(), points = points.len(), "building chart from data points");
        return ChartDecision {
            chart: Some(ChartSpec::from_points(chart_type, points, &options.palette)),
            hint: None,
        };
    }

    let hint = structured
        .filter(|s| s.needs_visualization == Some(true))
        .and_then(|s| s.visualization_hint.as_deref())
        .filter(|h| !h.trim().is_empty())
        .map(str::to_string);
    ChartDecision { chart: None, hint }
}

/// Cycle the palette so that every slice gets a colour.
pub fn palette_colors(palette: &[String], count: usize) -> Option<Vec<String>> {
    if palette.is_empty() || count == 0 {
        return None;
    }
    Some(palette.iter().cycle().take(count).cloned().collect())
}
