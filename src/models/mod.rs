//! Models module for the SDK
//!
//! Defines the structured (document) form of policies and allowlists together
//! with the constants that make up the line-oriented text grammar.

pub mod allowlist;
pub mod metadata;
pub mod policy;

pub use allowlist::{AllowlistDocument, AllowlistItem, ItemParseError};
pub use metadata::{ArtifactKind, GeneratedMetadata, IdFormat};
pub use policy::{Param, PolicyDocument, Rule, RuleParseError};

/// The only document version understood by the converter
pub const SUPPORTED_VERSION: &str = "1_0";

/// Separator between `gate`, `trigger`, `action` and the params block of a rule line
pub const RULE_FIELD_SEPARATOR: char = ':';

/// Separator between params inside the params block
pub const PARAM_SEPARATOR: char = ' ';

/// Separator between a param name and its value
pub const PARAM_ASSIGN: char = '=';

/// Separator between `gate` and `trigger_id` of an allowlist line
pub const ITEM_FIELD_SEPARATOR: char = ' ';

/// Lines starting with this prefix are comments
pub const COMMENT_PREFIX: char = '#';

/// Whether a text line carries no record (comment or blank)
pub fn is_skippable_line(line: &str) -> bool {
    line.starts_with(COMMENT_PREFIX) || line.trim().is_empty()
}

/// Deserialize an optional sequence, reading `null` the same as an absent key
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    let items: Option<Vec<T>> = serde::Deserialize::deserialize(deserializer)?;
    Ok(items.unwrap_or_default())
}

/// Whether a raw `version` value is the supported one
pub fn is_supported_version(version: Option<&str>) -> bool {
    version == Some(SUPPORTED_VERSION)
}
