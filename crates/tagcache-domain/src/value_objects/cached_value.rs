//! Values read back from the backing store

use serde::{Deserialize, Serialize};

/// A stored value after best-effort parsing
///
/// Text that parses as JSON becomes [`CachedValue::Json`]; anything else was
/// written by a producer that does not speak JSON and is kept verbatim as
/// [`CachedValue::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CachedValue {
    /// Structured value parsed from JSON text
    Json(serde_json::Value),
    /// Text that was not valid JSON, returned unchanged
    Raw(String),
}

impl CachedValue {
    /// Whether the stored text failed to parse as JSON
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// The parsed value, if the stored text was JSON
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// The raw text, if the stored text was not JSON
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Raw(text) => Some(text),
        }
    }

    /// Collapse into a JSON value; raw text becomes a JSON string
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Self::Json(value) => value,
            Self::Raw(text) => serde_json::Value::String(text),
        }
    }
}
