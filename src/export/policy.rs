//! Policy text exporter

use serde_json::Value;

use super::ExportError;
use crate::models::{ArtifactKind, PolicyDocument, is_supported_version};

/// Policy exporter for generating rule lines from a [`PolicyDocument`]
pub struct PolicyTextExporter;

impl PolicyTextExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export a policy to one line per rule, in rule order
    ///
    /// Returns no lines when the document version is not `1_0`.
    ///
    /// The text grammar cannot carry a space inside a param, nor an `=` inside
    /// a param name. Such params are still rendered, with a warning, but will
    /// not parse back to the same rule.
    ///
    /// # Example
    ///
    /// ```rust
    /// use policy_format_sdk::export::PolicyTextExporter;
    /// use policy_format_sdk::models::{PolicyDocument, Rule};
    ///
    /// let policy = PolicyDocument {
    ///     version: "1_0".to_string(),
    ///     ..Default::default()
    /// }
    /// .with_rule(Rule::new("dockerfile", "expose", "stop").with_param("port", "22"));
    ///
    /// let lines = PolicyTextExporter::new().export(&policy);
    /// assert_eq!(lines, vec!["dockerfile:expose:stop:port=22 ".to_string()]);
    /// ```
    pub fn export(&self, policy: &PolicyDocument) -> Vec<String> {
        if !policy.is_supported() {
            tracing::debug!(
                "Skipping policy '{}' with unsupported version '{}'",
                policy.name,
                policy.version
            );
            return Vec::new();
        }
        for rule in &policy.rules {
            for param in rule.params.iter().filter(|p| !p.is_text_representable()) {
                tracing::warn!(
                    "Param '{}' of rule {}:{} cannot be represented in text and will not re-import as written",
                    param.name,
                    rule.gate,
                    rule.trigger
                );
            }
        }
        policy.rules.iter().map(ToString::to_string).collect()
    }

    /// Export a policy given as a JSON mapping
    ///
    /// A null value, a non-object or a mapping whose `version` is not the
    /// string `1_0` yields no lines. A `1_0` mapping that does not decode as a
    /// policy is an [`ExportError`].
    pub fn export_value(&self, value: &Value) -> Result<Vec<String>, ExportError> {
        if !is_supported_version(value.get("version").and_then(Value::as_str)) {
            tracing::debug!("Skipping policy mapping without version 1_0");
            return Ok(Vec::new());
        }

        let policy: PolicyDocument =
            serde_json::from_value(value.clone()).map_err(|e| ExportError::InvalidDocument {
                kind: ArtifactKind::Policy,
                message: e.to_string(),
            })?;
        Ok(self.export(&policy))
    }
}

impl Default for PolicyTextExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rule;
    use serde_json::json;

    #[test]
    fn test_export_policy_value() {
        let value = json!({
            "version": "1_0",
            "rules": [{
                "gate": "dockerfile",
                "trigger": "expose",
                "action": "stop",
                "params": [{"name": "port", "value": "22"}]
            }]
        });
        let lines = PolicyTextExporter::new().export_value(&value).unwrap();
        assert_eq!(lines, vec!["dockerfile:expose:stop:port=22 "]);
    }

    #[test]
    fn test_export_rule_with_empty_params() {
        let value = json!({
            "version": "1_0",
            "rules": [{"gate": "dockerfile", "trigger": "from", "action": "warn", "params": []}]
        });
        let lines = PolicyTextExporter::new().export_value(&value).unwrap();
        assert_eq!(lines, vec!["dockerfile:from:warn"]);
    }

    #[test]
    fn test_export_unsupported_versions() {
        let exporter = PolicyTextExporter::new();
        let rules = json!([{"gate": "g", "trigger": "t", "action": "go"}]);
        assert!(
            exporter
                .export_value(&json!({"version": "2_0", "rules": rules}))
                .unwrap()
                .is_empty()
        );
        assert!(
            exporter
                .export_value(&json!({"rules": rules}))
                .unwrap()
                .is_empty()
        );
        assert!(exporter.export_value(&json!({})).unwrap().is_empty());
        assert!(exporter.export_value(&Value::Null).unwrap().is_empty());

        let policy = PolicyDocument {
            version: "0_9".to_string(),
            ..Default::default()
        }
        .with_rule(Rule::new("g", "t", "go"));
        assert!(exporter.export(&policy).is_empty());
    }

    #[test]
    fn test_export_supported_version_without_rules() {
        let lines = PolicyTextExporter::new()
            .export_value(&json!({"version": "1_0"}))
            .unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_export_null_params_list() {
        let value = json!({
            "version": "1_0",
            "rules": [{"gate": "g", "trigger": "t", "action": "a", "params": null}]
        });
        let lines = PolicyTextExporter::new().export_value(&value).unwrap();
        assert_eq!(lines, vec!["g:t:a"]);
    }

    #[test]
    fn test_export_null_rules_list() {
        let value = json!({"version": "1_0", "rules": null});
        let lines = PolicyTextExporter::new().export_value(&value).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_export_param_with_space_is_still_rendered() {
        let policy = PolicyDocument {
            version: "1_0".to_string(),
            ..Default::default()
        }
        .with_rule(Rule::new("g", "t", "a").with_param("n", "has space"));
        let lines = PolicyTextExporter::new().export(&policy);
        assert_eq!(lines, vec!["g:t:a:n=has space "]);
        assert!(lines[0].parse::<Rule>().is_err());
    }

    #[test]
    fn test_export_invalid_rule() {
        let value = json!({"version": "1_0", "rules": [{"gate": "dockerfile"}]});
        let err = PolicyTextExporter::new().export_value(&value).unwrap_err();
        assert!(err.to_string().starts_with("Invalid policy document"));
    }
}
