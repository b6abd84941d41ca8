use regex::Regex;
use tracing::trace;

use crate::interpret::currency::parse_amount_token;
use crate::interpret::label::normalize_label_with;
use crate::interpret::payload::StructuredPayload;
use crate::interpret::InterpretOptions;

/// `Rp 1.234.567`, `Rp1.234.567` or `Rp. 1.234.567`; group 1 is the digits.
const AMOUNT: &str = r"Rp\.?[ \t]?(\d[\d.]*)";

/// Labels recovered from surrounding prose must be longer than this.
const MIN_CONTEXT_LABEL_CHARS: usize = 2;

/// Window of text read in front of a bold amount.
const MIN_EMPHASIZED_CONTEXT_CHARS: usize = 5;
const MAX_EMPHASIZED_CONTEXT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Where a set of points came from; decides the default chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSource {
    TopCategories,
    Prose,
}

impl PointSource {
    pub fn of(structured: Option<&StructuredPayload>) -> Self {
        match structured {
            Some(payload) if category_points(payload).len() >= 2 => Self::TopCategories,
            _ => Self::Prose,
        }
    }
}

pub fn extract_points(structured: Option<&StructuredPayload>, intro: &str) -> Vec<DataPoint> {
    extract_points_with(structured, intro, &InterpretOptions::default())
}

/// Category data is used as-is when there are at least two entries; only
/// otherwise is the prose scanned.
pub fn extract_points_with(
    structured: Option<&StructuredPayload>,
    intro: &str,
    options: &InterpretOptions,
) -> Vec<DataPoint> {
    if let (PointSource::TopCategories, Some(payload)) = (PointSource::of(structured), structured) {
        return category_points(payload);
    }

    let text = prose_text(structured, intro);
    let mut points = emphasized_label_points(&text);
    points.extend(emphasized_value_points(&text, options.label_max_chars));
    points.extend(parenthesized_value_points(&text, options.label_max_chars));
    points
}

/// Categories with a name and a positive amount; the rest never reach a chart.
pub fn category_points(payload: &StructuredPayload) -> Vec<DataPoint> {
    payload
        .top_categories
        .iter()
        .filter(|c| !c.category.trim().is_empty() && c.amount.is_finite() && c.amount > 0.0)
        .map(|c| DataPoint::new(c.category.clone(), c.amount))
        .collect()
}

/// Intro, answer and each insight, empties skipped, one per line.
pub fn prose_text(structured: Option<&StructuredPayload>, intro: &str) -> String {
    let mut parts = vec![intro];
    if let Some(payload) = structured {
        parts.push(&payload.answer);
        parts.extend(payload.insights.iter().map(String::as_str));
    }
    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `**Makanan:** Rp 1.500.000`
pub fn emphasized_label_points(text: &str) -> Vec<DataPoint> {
    // Bold text cannot open with whitespace, so `** lalu **` between two runs is not a label.
    let re = Regex::new(&format!(r"\*\*([^*\s][^*\n]*?)\*\*[ \t]*:?[ \t]*{AMOUNT}")).expect("valid regex");
    let points: Vec<DataPoint> = re
        .captures_iter(text)
        .filter_map(|caps| {
            let label = caps.get(1)?.as_str().trim().trim_end_matches(':').trim_end();
            let value = parse_amount_token(caps.get(2)?.as_str());
            (!label.is_empty() && value > 0).then(|| DataPoint::new(label, value as f64))
        })
        .collect();
    trace!(count = points.len(), "emphasized label pass");
    points
}

/// `belanja makanan sebesar **Rp 1.500.000**`
///
/// The context is the text on the same line in front of the amount, cut at
/// the previous amount so one label never swallows another's figure.
pub fn emphasized_value_points(text: &str, max_label_chars: usize) -> Vec<DataPoint> {
    let token = Regex::new(&format!(r"\*\*{AMOUNT}\*\*")).expect("valid regex");
    let amount = Regex::new(AMOUNT).expect("valid regex");
    let mut points = Vec::new();
    let mut floor = 0;
    for caps in token.captures_iter(text) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let line_start = text[..whole.start()].rfind('\n').map_or(0, |idx| idx + 1);
        let mut context = &text[line_start.max(floor)..whole.start()];
        floor = whole.end();
        if let Some(previous) = amount.find_iter(context).last() {
            context = &context[previous.end()..];
        }
        let context = last_chars(context, MAX_EMPHASIZED_CONTEXT_CHARS);
        if context.chars().count() < MIN_EMPHASIZED_CONTEXT_CHARS {
            continue;
        }
        points.extend(context_point(context, digits.as_str(), max_label_chars));
    }
    trace!(count = points.len(), "emphasized value pass");
    points
}

/// `transportasi (Rp 450.000)`
pub fn parenthesized_value_points(text: &str, max_label_chars: usize) -> Vec<DataPoint> {
    let re = Regex::new(&format!(r"([^()\n]{{5,60}})\([ \t]*{AMOUNT}[ \t]*\)")).expect("valid regex");
    let points: Vec<DataPoint> = re
        .captures_iter(text)
        .filter_map(|caps| context_point(caps.get(1)?.as_str(), caps.get(2)?.as_str(), max_label_chars))
        .collect();
    trace!(count = points.len(), "parenthesized value pass");
    points
}

fn context_point(context: &str, token: &str, max_label_chars: usize) -> Option<DataPoint> {
    let label = normalize_label_with(context, max_label_chars);
    let value = parse_amount_token(token);
    if label.chars().count() <= MIN_CONTEXT_LABEL_CHARS || value == 0 {
        return None;
    }
    Some(DataPoint::new(label, value as f64))
}

fn last_chars(text: &str, max_chars: usize) -> &str {
    let skip = text.chars().count().saturating_sub(max_chars);
    text.char_indices().nth(skip).map_or(text, |(idx, _)| &text[idx..])
}
