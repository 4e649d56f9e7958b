//! Allowlist text importer

use super::{ImportError, record_lines};
use crate::config::ConverterConfig;
use crate::models::{AllowlistDocument, AllowlistItem, ArtifactKind, GeneratedMetadata};

/// Allowlist importer for parsing `gate trigger_id` lines
pub struct AllowlistTextImporter {
    config: ConverterConfig,
}

impl AllowlistTextImporter {
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Import an allowlist from text
    ///
    /// # Example
    ///
    /// ```rust
    /// use policy_format_sdk::import::AllowlistTextImporter;
    ///
    /// let allowlist = AllowlistTextImporter::new()
    ///     .import("# comment\n\nfoo bar\n")
    ///     .unwrap();
    /// assert_eq!(allowlist.items.len(), 1);
    /// assert_eq!(allowlist.items[0].trigger_id, "bar");
    /// ```
    pub fn import(&self, text: &str) -> Result<AllowlistDocument, ImportError> {
        let metadata = GeneratedMetadata::generate(ArtifactKind::Allowlist, &self.config);
        self.import_with_metadata(text, metadata)
    }

    /// Import an allowlist from text, stamping it with the given metadata
    pub fn import_with_metadata(
        &self,
        text: &str,
        metadata: GeneratedMetadata,
    ) -> Result<AllowlistDocument, ImportError> {
        let mut allowlist = AllowlistDocument::new(metadata);

        for (line_number, line) in record_lines(text) {
            let item = line
                .parse::<AllowlistItem>()
                .map_err(|reason| ImportError::MalformedItem {
                    line_number,
                    line: line.to_string(),
                    reason,
                })?;
            allowlist.items.push(item);
        }

        tracing::debug!(
            "Imported allowlist '{}' with {} items",
            allowlist.name,
            allowlist.items.len()
        );
        Ok(allowlist)
    }
}

impl Default for AllowlistTextImporter {
    fn default() -> Self {
        Self::new()
    }
}
