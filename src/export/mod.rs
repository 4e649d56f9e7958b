//! Export functionality
//!
//! Renders structured documents as text lines:
//! - Policy -> `gate:trigger:action[:name=value ...]`
//! - Allowlist -> `gate trigger_id`
//!
//! Documents whose version is not `1_0` export as an empty line list.

pub mod allowlist;
pub mod policy;

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid {kind} document: {message}")]
    InvalidDocument {
        kind: crate::models::ArtifactKind,
        message: String,
    },
}

/// Join exported lines into a newline-terminated text blob
pub fn lines_to_text(lines: &[String]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

// Re-export for convenience
pub use allowlist::AllowlistTextExporter;
pub use policy::PolicyTextExporter;
