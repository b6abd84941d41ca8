//! Turns one assistant reply into display text and at most one chart.
//!
//! The reply is split into prose and an optional ```` ```json ```` payload.
//! Category totals from the payload become chart points directly; otherwise
//! Rupiah amounts are scraped out of the prose, deduplicated, and handed to
//! the chart selector. Nothing in here fails: every problem degrades to
//! plain text.

pub mod chart;
pub mod currency;
pub mod dedup;
pub mod extract;
pub mod label;
pub mod message;
pub mod payload;
pub mod visualizer;

use chrono::{DateTime, Utc};
use serde::Serialize;

use chart::{select_chart, ChartSpec, DEFAULT_PALETTE, MIN_CHART_POINTS};
use dedup::dedup_points;
use extract::{extract_points_with, PointSource};
use label::DEFAULT_LABEL_MAX_CHARS;
use message::{RawMessage, Role};
use payload::{parse_content, StructuredPayload};

#[derive(Debug, Clone, PartialEq)]
pub struct InterpretOptions {
    pub label_max_chars: usize,
    pub min_chart_points: usize,
    pub palette: Vec<String>,
}

impl Default for InterpretOptions {
    fn default() -> Self {
        Self {
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            min_chart_points: MIN_CHART_POINTS,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl InterpretOptions {
    pub fn min_points(&self) -> usize {
        self.min_chart_points.max(MIN_CHART_POINTS)
    }
}

/// Everything the renderer needs for one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub role: Role,
    pub intro: String,
    pub structured: Option<StructuredPayload>,
    pub chart: Option<ChartSpec>,
    pub hint: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub fn interpret(message: &RawMessage) -> MessageView {
    interpret_with(message, &InterpretOptions::default())
}

pub fn interpret_with(message: &RawMessage, options: &InterpretOptions) -> MessageView {
    if message.role == Role::User {
        return MessageView {
            role: message.role,
            intro: message.content.clone(),
            structured: None,
            chart: None,
            hint: None,
            created_at: message.created_at,
        };
    }

    let parsed = parse_content(&message.content);
    let structured = parsed.structured.as_ref();
    let source = PointSource::of(structured);
    let points = extract_points_with(structured, &parsed.intro, options);
    let points = match source {
        PointSource::TopCategories => points,
        PointSource::Prose => dedup_points(points),
    };
    let decision = select_chart(structured, &points, source, message.backend_visualization(), options);

    MessageView {
        role: message.role,
        intro: parsed.intro,
        structured: parsed.structured,
        chart: decision.chart,
        hint: decision.hint,
        created_at: message.created_at,
    }
}
