use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat message as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub role: Role,
    pub content: String,
    /// Chart data, statistics, etc. Only `visualization` is read here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl RawMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            session_id: None,
            role,
            content: content.into(),
            metadata: None,
            token_used: None,
            response_time: None,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn with_visualization(mut self, visualization: Value) -> Self {
        let mut metadata = match self.metadata.take() {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        metadata.insert("visualization".to_string(), visualization);
        self.metadata = Some(Value::Object(metadata));
        self
    }

    pub fn backend_visualization(&self) -> Option<&Value> {
        self.metadata
            .as_ref()?
            .get("visualization")
            .filter(|v| !v.is_null())
    }
}

/// Decode a conversation: either a JSON array of messages or an object with
/// a `messages` array. The backend lists newest first; the result is oldest first.
pub fn decode_conversation(text: &str) -> Result<Vec<RawMessage>> {
    let doc: Value = serde_json::from_str(text).context("Conversation is not valid JSON")?;
    let items = match doc {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("messages") {
            Some(Value::Array(items)) => items,
            _ => return Err(anyhow!("Conversation object has no `messages` array")),
        },
        _ => return Err(anyhow!("Conversation must be an array or an object with `messages`")),
    };

    let mut messages = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<RawMessage>(item)
                .with_context(|| format!("Invalid message at index {}", idx))
        })
        .collect::<Result<Vec<_>>>()?;
    messages.reverse();
    Ok(messages)
}

pub fn decode_message(text: &str) -> Result<RawMessage> {
    serde_json::from_str(text).context("Message is not a valid chat message JSON object")
}
