//! Allowlist document model
//!
//! An allowlist exempts (gate, trigger) pairs from their normal action. In text
//! form each item is `<gate> <trigger_id>` on its own line.

use serde::{Deserialize, Serialize};

use super::metadata::GeneratedMetadata;
use super::{ITEM_FIELD_SEPARATOR, SUPPORTED_VERSION};

/// One exempted (gate, trigger) pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllowlistItem {
    pub gate: String,
    pub trigger_id: String,
}

impl AllowlistItem {
    pub fn new(gate: impl Into<String>, trigger_id: impl Into<String>) -> Self {
        Self {
            gate: gate.into(),
            trigger_id: trigger_id.into(),
        }
    }
}

/// Why an allowlist line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemParseError {
    #[error("expected at least 2 space-separated fields (gate trigger_id), found {found}")]
    MissingFields { found: usize },
}

impl std::str::FromStr for AllowlistItem {
    type Err = ItemParseError;

    /// Parse `<gate> <trigger_id>`; fields after the second are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(ITEM_FIELD_SEPARATOR);
        match (fields.next(), fields.next()) {
            (Some(gate), Some(trigger_id)) => Ok(AllowlistItem::new(gate, trigger_id)),
            _ => Err(ItemParseError::MissingFields {
                found: s.split(ITEM_FIELD_SEPARATOR).count(),
            }),
        }
    }
}

impl std::fmt::Display for AllowlistItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.gate, ITEM_FIELD_SEPARATOR, self.trigger_id)
    }
}

/// Structured allowlist document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub items: Vec<AllowlistItem>,
}

impl AllowlistDocument {
    /// Create an empty `1_0` document stamped with generated metadata
    pub fn new(metadata: GeneratedMetadata) -> Self {
        Self {
            id: metadata.id,
            name: metadata.name,
            version: SUPPORTED_VERSION.to_string(),
            comment: metadata.comment,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: AllowlistItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn is_supported(&self) -> bool {
        self.version == SUPPORTED_VERSION
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
