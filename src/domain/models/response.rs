#[cfg(test)]
#[path = "response_test.rs"]
mod tests;

use serde::Deserializer;
use serde_derive::Deserialize;
use serde_json::Value;

pub const UNKNOWN_STATUS: &str = "unknown";
pub const ANSWER_PLACEHOLDER: &str = "Không có phản hồi";

/// Reads any JSON scalar as text, so `"answer": 42` shows as `42` instead of
/// failing the whole body. `null` counts as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match <Option<Value> as serde::Deserialize>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => return Ok(Some(text)),
        Some(other) => return Ok(Some(other.to_string())),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    PartialSuccess,
    Other(String),
}

impl ResponseStatus {
    pub fn parse(status: &str) -> ResponseStatus {
        match status {
            "success" => return ResponseStatus::Success,
            "partial_success" => return ResponseStatus::PartialSuccess,
            other => return ResponseStatus::Other(other.to_string()),
        }
    }

    /// Prepended to every formatted answer. Unlabeled statuses get nothing.
    pub fn prefix(&self) -> &'static str {
        match self {
            ResponseStatus::Success => return "[Success] ",
            ResponseStatus::PartialSuccess => return "[Warning] ",
            ResponseStatus::Other(_) => return "",
        }
    }
}

/// Body returned by `/ask`, `/translate` and `/summary`. Every field is
/// optional on the wire, use the accessors to get the defaulted values.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub answer: Option<String>,
    #[serde(default, rename = "type")]
    pub response_type: Option<String>,
    #[serde(default)]
    pub original_text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    #[cfg(test)]
    pub fn new(status: &str, answer: &str) -> ResponseEnvelope {
        return ResponseEnvelope {
            status: Some(status.to_string()),
            answer: Some(answer.to_string()),
            ..Default::default()
        };
    }

    pub fn status(&self) -> ResponseStatus {
        return ResponseStatus::parse(self.status.as_deref().unwrap_or(UNKNOWN_STATUS));
    }

    pub fn answer(&self) -> String {
        return self
            .answer
            .clone()
            .unwrap_or_else(|| return ANSWER_PLACEHOLDER.to_string());
    }
}

/// Body returned by `GET /health`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub model_loaded: Option<bool>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<String>,
}
