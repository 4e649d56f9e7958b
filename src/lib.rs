//! Policy Format SDK - conversion between structured and text policy artifacts
//!
//! Provides:
//! - Policy and allowlist document models (version `1_0`)
//! - Text import (`gate:trigger:action[:name=value ...]` and `gate trigger_id` lines)
//! - Text export from structured documents or JSON mappings
//! - A dispatch table keyed by artifact kind (`policy`, `allowlist`, `whitelist`)
//!   and input shape
//! - Converter configuration for generated ids and names

pub mod config;
pub mod convert;
pub mod export;
pub mod import;
pub mod models;

// Re-export commonly used types
pub use config::{ConfigError, ConverterConfig};
pub use convert::{
    ConversionError, ConversionInput, ConversionOutput, InputShape, convert, convert_with_config,
};
pub use export::{AllowlistTextExporter, ExportError, PolicyTextExporter};
pub use import::{AllowlistTextImporter, ImportError, PolicyTextImporter};
pub use models::{
    AllowlistDocument, AllowlistItem, ArtifactKind, GeneratedMetadata, IdFormat, Param,
    PolicyDocument, Rule, SUPPORTED_VERSION,
};
