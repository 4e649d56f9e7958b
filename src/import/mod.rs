//! Import functionality
//!
//! Parses the line-oriented text form into structured documents:
//! - Policy (`gate:trigger:action[:name=value ...]` lines)
//! - Allowlist (`gate trigger_id` lines)
//!
//! Blank lines and lines starting with `#` are skipped. The first malformed
//! line aborts the import.

pub mod allowlist;
pub mod policy;

use crate::models::{ItemParseError, RuleParseError};

/// Error during import
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("Malformed rule on line {line_number} ('{line}'): {reason}")]
    MalformedRule {
        /// 1-based line number within the input text
        line_number: usize,
        line: String,
        #[source]
        reason: RuleParseError,
    },
    #[error("Malformed allowlist item on line {line_number} ('{line}'): {reason}")]
    MalformedItem {
        /// 1-based line number within the input text
        line_number: usize,
        line: String,
        #[source]
        reason: ItemParseError,
    },
}

impl ImportError {
    /// 1-based number of the offending line
    pub fn line_number(&self) -> usize {
        match self {
            ImportError::MalformedRule { line_number, .. }
            | ImportError::MalformedItem { line_number, .. } => *line_number,
        }
    }

    /// The offending line as it appeared in the input
    pub fn line(&self) -> &str {
        match self {
            ImportError::MalformedRule { line, .. } | ImportError::MalformedItem { line, .. } => {
                line
            }
        }
    }
}

/// Non-comment, non-blank lines with their 1-based line numbers
pub(crate) fn record_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !crate::models::is_skippable_line(line))
}

// Re-export for convenience
pub use allowlist::AllowlistTextImporter;
pub use policy::PolicyTextImporter;
