//! Metadata generated for documents built from text
//!
//! The text form carries only records, so a document produced from text gets a
//! fresh identifier, a timestamped name and a provenance comment. None of these
//! take part in the text encoding.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ConverterConfig;

/// Kind of artifact being converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Policy: ordered gate/trigger/action rules
    Policy,
    /// Allowlist: gate/trigger_id exemptions (legacy name: whitelist)
    Allowlist,
}

impl ArtifactKind {
    /// Legacy name accepted as a synonym for [`ArtifactKind::Allowlist`]
    pub const LEGACY_ALLOWLIST_ALIAS: &'static str = "whitelist";

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Policy => "policy",
            ArtifactKind::Allowlist => "allowlist",
        }
    }

    /// Capitalized label used in generated names and comments
    fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Policy => "Policy",
            ArtifactKind::Allowlist => "Allowlist",
        }
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "policy" => Ok(ArtifactKind::Policy),
            "allowlist" | ArtifactKind::LEGACY_ALLOWLIST_ALIAS => Ok(ArtifactKind::Allowlist),
            _ => Err(format!(
                "Unknown artifact kind: {}. Use 'policy', 'allowlist' or 'whitelist'.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Textual form used for generated identifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdFormat {
    /// Canonical UUID form, e.g. `550e8400-e29b-41d4-a716-446655440000`
    #[default]
    Hyphenated,
    /// 32 hex digits without hyphens (the legacy bundle id form)
    Simple,
}

impl IdFormat {
    /// Render a UUID in this format
    pub fn render(&self, id: Uuid) -> String {
        match self {
            IdFormat::Hyphenated => id.hyphenated().to_string(),
            IdFormat::Simple => id.simple().to_string(),
        }
    }
}

impl std::str::FromStr for IdFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hyphenated" => Ok(IdFormat::Hyphenated),
            "simple" | "hex" => Ok(IdFormat::Simple),
            _ => Err(format!(
                "Unknown id format: {}. Use 'hyphenated' or 'simple'.",
                s
            )),
        }
    }
}

/// Identity fields stamped on a document generated from text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMetadata {
    /// Document identifier
    pub id: String,
    /// `<prefix>-<timestamp>`
    pub name: String,
    /// Provenance note embedding the same timestamp
    pub comment: String,
    /// Generation instant
    pub generated_at: DateTime<Utc>,
}

impl GeneratedMetadata {
    /// Generate metadata from a fresh v4 UUID and the current UTC time
    pub fn generate(kind: ArtifactKind, config: &ConverterConfig) -> Self {
        Self::at(kind, Uuid::new_v4(), Utc::now(), config)
    }

    /// Build metadata from an explicit identifier and instant
    pub fn at(
        kind: ArtifactKind,
        id: Uuid,
        generated_at: DateTime<Utc>,
        config: &ConverterConfig,
    ) -> Self {
        let timestamp = format_timestamp(&generated_at);
        let prefix = config.name_prefix(kind);
        Self {
            id: config.id_format.render(id),
            name: format!("{}-{}", prefix, timestamp),
            comment: format!(
                "{} json generated automatically from raw txt document on {}",
                kind.label(),
                timestamp
            ),
            generated_at,
        }
    }
}

/// ISO 8601 UTC timestamp with microsecond precision
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}
