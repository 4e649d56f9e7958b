//! Policy text importer
//!
//! Converts policy text into a [`PolicyDocument`] with freshly generated
//! id, name and comment.

use super::{ImportError, record_lines};
use crate::config::ConverterConfig;
use crate::models::{ArtifactKind, GeneratedMetadata, PolicyDocument, Rule};

/// Policy importer for parsing rule lines
pub struct PolicyTextImporter {
    config: ConverterConfig,
}

impl PolicyTextImporter {
    /// Create a new importer with default configuration
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Create a new importer using `config` for generated metadata
    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Import a policy from text
    ///
    /// # Arguments
    ///
    /// * `text` - Newline-separated rule lines
    ///
    /// # Returns
    ///
    /// A `1_0` [`PolicyDocument`] with rules in line order, or the error for
    /// the first malformed line
    ///
    /// # Example
    ///
    /// ```rust
    /// use policy_format_sdk::import::PolicyTextImporter;
    ///
    /// let importer = PolicyTextImporter::new();
    /// let policy = importer.import("dockerfile:expose:stop:port=22\n").unwrap();
    /// assert_eq!(policy.version, "1_0");
    /// assert_eq!(policy.rules[0].gate, "dockerfile");
    /// assert_eq!(policy.rules[0].params[0].value, "22");
    /// ```
    pub fn import(&self, text: &str) -> Result<PolicyDocument, ImportError> {
        let metadata = GeneratedMetadata::generate(ArtifactKind::Policy, &self.config);
        self.import_with_metadata(text, metadata)
    }

    /// Import a policy from text, stamping it with the given metadata
    pub fn import_with_metadata(
        &self,
        text: &str,
        metadata: GeneratedMetadata,
    ) -> Result<PolicyDocument, ImportError> {
        let mut policy = PolicyDocument::new(metadata);

        for (line_number, line) in record_lines(text) {
            let rule = line
                .parse::<Rule>()
                .map_err(|reason| ImportError::MalformedRule {
                    line_number,
                    line: line.to_string(),
                    reason,
                })?;
            policy.rules.push(rule);
        }

        tracing::debug!(
            "Imported policy '{}' with {} rules",
            policy.name,
            policy.rules.len()
        );
        Ok(policy)
    }
}

impl Default for PolicyTextImporter {
    fn default() -> Self {
        Self::new()
    }
}
