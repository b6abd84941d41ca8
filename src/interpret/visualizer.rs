//! Chart generation from the raw analytics data the backend works with:
//! `categories` (`category_name`, `amount`) and `months` (`month`,
//! `expense`, `net`).

use serde_json::{Map, Value};
use tracing::debug;

use crate::interpret::chart::{palette_colors, ChartConfig, ChartSpec, ChartType, MIN_CHART_POINTS};

const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

/// Pie slices get at most this many palette colours before repeating.
const MAX_PIE_COLORS: usize = 10;

pub fn month_name(month: i64) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|idx| MONTH_NAMES.get(idx))
        .copied()
        .unwrap_or("Unknown")
}

/// Build a chart of the requested kind. `table` yields no chart; unknown
/// kinds fall back to a bar chart. `raw` may be an object or a JSON string
/// holding one.
pub fn chart_from_raw(kind: &str, raw: &Value, palette: &[String]) -> Option<ChartSpec> {
    let data = decode_raw(raw)?;
    let spec = match kind.trim().to_ascii_lowercase().as_str() {
        "table" => {
            debug!("table visualization has no chart form");
            return None;
        }
        "line" => line_chart(&data),
        "pie" | "donut" => pie_chart(&data, palette),
        _ => bar_chart(&data),
    };
    spec.is_chartable(MIN_CHART_POINTS).then_some(spec)
}

/// When a whole reply is a JSON object asking for a visualization, chart its
/// `data` member (or the object itself).
pub fn visualize_response(response: &str, palette: &[String]) -> Option<ChartSpec> {
    let doc: Value = serde_json::from_str(response.trim()).ok()?;
    if doc.get("needs_visualization").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    let kind = doc
        .get("visualization_type")
        .and_then(Value::as_str)
        .unwrap_or("bar");
    let data = match doc.get("data") {
        Some(data @ Value::Object(_)) => data,
        _ => &doc,
    };
    chart_from_raw(kind, data, palette)
}

fn decode_raw(raw: &Value) -> Option<Map<String, Value>> {
    match raw {
        Value::Object(map) => Some(map.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(err) => {
                debug!(error = %err, "raw visualization data is not JSON");
                None
            }
        },
        _ => None,
    }
}

fn bar_chart(data: &Map<String, Value>) -> ChartSpec {
    let mut pairs = category_pairs(data);
    pairs.extend(month_pairs(data, &["expense"]));
    assemble(ChartType::Bar, pairs, None)
}

fn line_chart(data: &Map<String, Value>) -> ChartSpec {
    assemble(ChartType::Line, month_pairs(data, &["net", "expense"]), None)
}

fn pie_chart(data: &Map<String, Value>, palette: &[String]) -> ChartSpec {
    let pairs = category_pairs(data);
    let shades: Vec<String> = palette.iter().take(MAX_PIE_COLORS).cloned().collect();
    let colors = palette_colors(&shades, pairs.len());
    assemble(ChartType::Pie, pairs, colors)
}

fn category_pairs(data: &Map<String, Value>) -> Vec<(String, f64)> {
    entries(data, "categories")
        .filter_map(|cat| {
            let name = cat.get("category_name")?.as_str()?;
            let amount = cat.get("amount")?.as_f64()?;
            Some((name.to_string(), amount))
        })
        .collect()
}

/// Month rows, valued by the first of `fields` that is present.
fn month_pairs(data: &Map<String, Value>, fields: &[&str]) -> Vec<(String, f64)> {
    entries(data, "months")
        .filter_map(|row| {
            let month = row.get("month")?.as_f64()?;
            let value = fields
                .iter()
                .find_map(|field| row.get(*field).and_then(Value::as_f64))?;
            Some((month_name(month as i64).to_string(), value))
        })
        .collect()
}

fn entries<'a>(data: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    data.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn assemble(chart_type: ChartType, pairs: Vec<(String, f64)>, colors: Option<Vec<String>>) -> ChartSpec {
    let (labels, values): (Vec<String>, Vec<f64>) = pairs.into_iter().unzip();
    ChartSpec {
        chart_type,
        labels,
        values,
        colors,
        config: Some(ChartConfig::for_type(chart_type)),
    }
}
