use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::interpret::chart::ChartType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_count: Option<u64>,
}

impl CategoryAmount {
    /// Entries without a textual category or a numeric amount are skipped.
    fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            category: value.get("category")?.as_str()?.to_string(),
            amount: value.get("amount")?.as_f64()?,
            percentage: value.get("percentage").and_then(Value::as_f64),
            transaction_count: value.get("transaction_count").and_then(Value::as_u64),
        })
    }
}

/// The structured part of an assistant reply, with every field defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredPayload {
    pub answer: String,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub top_categories: Vec<CategoryAmount>,
    pub needs_visualization: Option<bool>,
    pub visualization_type: Option<ChartType>,
    pub visualization_hint: Option<String>,
}

impl StructuredPayload {
    pub fn from_document(doc: &Value) -> Self {
        // `recommendations` wins; the legacy list only fills in when it is absent or empty.
        let mut recommendations = string_list(doc.get("recommendations"));
        if recommendations.is_empty() {
            recommendations = string_list(doc.get("optimization_opportunities"));
        }

        Self {
            answer: doc
                .get("answer")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            insights: string_list(doc.get("insights")),
            recommendations,
            top_categories: doc
                .get("top_categories")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(CategoryAmount::from_value).collect())
                .unwrap_or_default(),
            needs_visualization: doc.get("needs_visualization").and_then(Value::as_bool),
            visualization_type: doc
                .get("visualization_type")
                .and_then(Value::as_str)
                .and_then(ChartType::from_declared),
            visualization_hint: doc
                .get("visualization_hint")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedMessage {
    pub intro: String,
    pub structured: Option<StructuredPayload>,
}

impl ParsedMessage {
    fn unstructured(content: &str) -> Self {
        Self {
            intro: content.to_string(),
            structured: None,
        }
    }
}

/// Split a reply into the prose before its first ```` ```json ```` block and
/// the parsed block. A block that fails to parse leaves the whole reply as prose.
pub fn parse_content(content: &str) -> ParsedMessage {
    // (?s) lets the body span lines; lazy so only the first block is taken
    let re = Regex::new(r"(?s)```json\s*\n(.*?)\n```").expect("valid regex");
    let Some(caps) = re.captures(content) else {
        return ParsedMessage::unstructured(content);
    };
    let (Some(block), Some(body)) = (caps.get(0), caps.get(1)) else {
        return ParsedMessage::unstructured(content);
    };

    match serde_json::from_str::<Value>(body.as_str()) {
        Ok(Value::Null) => {
            debug!("json block is null; treating reply as prose");
            ParsedMessage::unstructured(content)
        }
        Ok(doc) => ParsedMessage {
            intro: content[..block.start()].trim().to_string(),
            structured: Some(StructuredPayload::from_document(&doc)),
        },
        Err(err) => {
            debug!(error = %err, "json block failed to parse; treating reply as prose");
            ParsedMessage::unstructured(content)
        }
    }
}
