//! Allowlist text exporter

use serde_json::Value;

use super::ExportError;
use crate::models::{AllowlistDocument, ArtifactKind, is_supported_version};

/// Allowlist exporter for generating `gate trigger_id` lines
pub struct AllowlistTextExporter;

impl AllowlistTextExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export an allowlist to one line per item; empty unless version is `1_0`
    pub fn export(&self, allowlist: &AllowlistDocument) -> Vec<String> {
        if !allowlist.is_supported() {
            tracing::debug!(
                "Skipping allowlist '{}' with unsupported version '{}'",
                allowlist.name,
                allowlist.version
            );
            return Vec::new();
        }
        allowlist.items.iter().map(ToString::to_string).collect()
    }

    /// Export an allowlist given as a JSON mapping
    pub fn export_value(&self, value: &Value) -> Result<Vec<String>, ExportError> {
        if !is_supported_version(value.get("version").and_then(Value::as_str)) {
            tracing::debug!("Skipping allowlist mapping without version 1_0");
            return Ok(Vec::new());
        }

        let allowlist: AllowlistDocument =
            serde_json::from_value(value.clone()).map_err(|e| ExportError::InvalidDocument {
                kind: ArtifactKind::Allowlist,
                message: e.to_string(),
            })?;
        Ok(self.export(&allowlist))
    }
}

impl Default for AllowlistTextExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_allowlist() {
        let value = json!({
            "id": "abc",
            "version": "1_0",
            "items": [
                {"gate": "foo", "trigger_id": "bar"},
                {"gate": "anchoresec", "trigger_id": "CVE-2023-1234+openssl"}
            ]
        });
        let lines = AllowlistTextExporter::new().export_value(&value).unwrap();
        assert_eq!(lines, vec!["foo bar", "anchoresec CVE-2023-1234+openssl"]);
    }

    #[test]
    fn test_export_unsupported_version() {
        let value = json!({"version": "1", "items": [{"gate": "foo", "trigger_id": "bar"}]});
        assert!(
            AllowlistTextExporter::new()
                .export_value(&value)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_export_null_items_list() {
        let value = json!({"version": "1_0", "items": null});
        assert!(
            AllowlistTextExporter::new()
                .export_value(&value)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_export_item_missing_trigger_id() {
        let value = json!({"version": "1_0", "items": [{"gate": "foo"}]});
        assert!(AllowlistTextExporter::new().export_value(&value).is_err());
    }
}
