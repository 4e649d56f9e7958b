//! Artifact format converter
//!
//! Routes a conversion request to the right importer or exporter based on the
//! artifact kind (`policy`, `allowlist`, or the legacy `whitelist`) and the
//! shape of the input. Text input converts to a structured document and
//! structured input converts to text lines.

use serde_json::Value;

use crate::config::ConverterConfig;
use crate::export::{AllowlistTextExporter, ExportError, PolicyTextExporter, lines_to_text};
use crate::import::{AllowlistTextImporter, ImportError, PolicyTextImporter};
use crate::models::{AllowlistDocument, ArtifactKind, PolicyDocument};

/// Error during format conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Import error: {0}")]
    ImportError(#[from] ImportError),
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),
    #[error("Unsupported artifact kind: {0}")]
    UnsupportedKind(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Shape of a conversion input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputShape {
    /// Newline-separated text
    Text,
    /// JSON mapping
    Structured,
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputShape::Text => write!(f, "text"),
            InputShape::Structured => write!(f, "structured"),
        }
    }
}

/// Input to [`convert`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionInput {
    Text(String),
    Structured(Value),
}

impl ConversionInput {
    pub fn shape(&self) -> InputShape {
        match self {
            ConversionInput::Text(_) => InputShape::Text,
            ConversionInput::Structured(_) => InputShape::Structured,
        }
    }
}

impl From<&str> for ConversionInput {
    fn from(text: &str) -> Self {
        ConversionInput::Text(text.to_string())
    }
}

impl From<String> for ConversionInput {
    fn from(text: String) -> Self {
        ConversionInput::Text(text)
    }
}

impl From<Value> for ConversionInput {
    fn from(value: Value) -> Self {
        ConversionInput::Structured(value)
    }
}

/// Result of [`convert`]: the opposite representation of the input
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "conversion output contains the converted artifact and should be used"]
pub enum ConversionOutput {
    /// Text lines produced from a structured document
    Lines(Vec<String>),
    /// Policy produced from text
    Policy(PolicyDocument),
    /// Allowlist produced from text
    Allowlist(AllowlistDocument),
}

impl ConversionOutput {
    /// The text lines, if this output is text
    pub fn as_lines(&self) -> Option<&[String]> {
        match self {
            ConversionOutput::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    /// Newline-terminated text, if this output is text
    pub fn to_text(&self) -> Option<String> {
        self.as_lines().map(lines_to_text)
    }

    /// Structured output as a JSON value; text output becomes an array of strings
    pub fn to_json_value(&self) -> Result<Value, ConversionError> {
        let value = match self {
            ConversionOutput::Lines(lines) => serde_json::to_value(lines),
            ConversionOutput::Policy(policy) => serde_json::to_value(policy),
            ConversionOutput::Allowlist(allowlist) => serde_json::to_value(allowlist),
        };
        value.map_err(|e| ConversionError::SerializationError(e.to_string()))
    }
}

/// Text -> structured document
pub type TextConversion = fn(&str, &ConverterConfig) -> Result<ConversionOutput, ConversionError>;

/// Structured document -> text lines
pub type StructuredConversion = fn(&Value) -> Result<ConversionOutput, ConversionError>;

/// A single conversion direction
#[derive(Clone, Copy)]
pub enum Conversion {
    FromText(TextConversion),
    FromStructured(StructuredConversion),
}

impl Conversion {
    /// Input shape this conversion accepts
    pub fn shape(&self) -> InputShape {
        match self {
            Conversion::FromText(_) => InputShape::Text,
            Conversion::FromStructured(_) => InputShape::Structured,
        }
    }
}

impl std::fmt::Debug for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Conversion::{:?}", self.shape())
    }
}

/// Dispatch table entry: both directions for one artifact kind name
#[derive(Clone, Copy)]
pub struct ConversionEntry {
    /// Artifact kind name as accepted by [`convert`]
    pub kind: &'static str,
    pub from_text: TextConversion,
    pub from_structured: StructuredConversion,
}

impl ConversionEntry {
    /// The conversion accepting `shape`
    pub fn conversion(&self, shape: InputShape) -> Conversion {
        match shape {
            InputShape::Text => Conversion::FromText(self.from_text),
            InputShape::Structured => Conversion::FromStructured(self.from_structured),
        }
    }

    /// Run the conversion matching the input's shape
    pub fn apply(
        &self,
        input: &ConversionInput,
        config: &ConverterConfig,
    ) -> Result<ConversionOutput, ConversionError> {
        match input {
            ConversionInput::Text(text) => (self.from_text)(text, config),
            ConversionInput::Structured(value) => (self.from_structured)(value),
        }
    }
}

impl std::fmt::Debug for ConversionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionEntry")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

static CONVERSION_TABLE: [ConversionEntry; 3] = [
    ConversionEntry {
        kind: "allowlist",
        from_text: allowlist_from_text,
        from_structured: allowlist_from_structured,
    },
    ConversionEntry {
        kind: ArtifactKind::LEGACY_ALLOWLIST_ALIAS,
        from_text: allowlist_from_text,
        from_structured: allowlist_from_structured,
    },
    ConversionEntry {
        kind: "policy",
        from_text: policy_from_text,
        from_structured: policy_from_structured,
    },
];

fn policy_from_text(
    text: &str,
    config: &ConverterConfig,
) -> Result<ConversionOutput, ConversionError> {
    let policy = PolicyTextImporter::with_config(config.clone()).import(text)?;
    Ok(ConversionOutput::Policy(policy))
}

fn policy_from_structured(value: &Value) -> Result<ConversionOutput, ConversionError> {
    Ok(ConversionOutput::Lines(policy_structured_to_text(value)?))
}

fn allowlist_from_text(
    text: &str,
    config: &ConverterConfig,
) -> Result<ConversionOutput, ConversionError> {
    let allowlist = AllowlistTextImporter::with_config(config.clone()).import(text)?;
    Ok(ConversionOutput::Allowlist(allowlist))
}

fn allowlist_from_structured(value: &Value) -> Result<ConversionOutput, ConversionError> {
    Ok(ConversionOutput::Lines(allowlist_structured_to_text(value)?))
}

/// All registered conversions
pub fn conversion_table() -> &'static [ConversionEntry] {
    &CONVERSION_TABLE
}

/// Find the table entry for an artifact kind, matched case-insensitively
pub fn lookup_entry(kind: &str) -> Option<&'static ConversionEntry> {
    let kind = kind.trim().to_lowercase();
    CONVERSION_TABLE.iter().find(|entry| entry.kind == kind)
}

/// Find the conversion for an artifact kind and input shape
pub fn lookup_conversion(kind: &str, shape: InputShape) -> Option<Conversion> {
    lookup_entry(kind).map(|entry| entry.conversion(shape))
}

/// Convert an artifact to its opposite representation with default configuration
///
/// # Arguments
///
/// * `kind` - `"policy"`, `"allowlist"` or `"whitelist"`
/// * `input` - Text or a structured JSON mapping
///
/// # Example
///
/// ```rust
/// use policy_format_sdk::convert::{ConversionOutput, convert};
///
/// let output = convert("whitelist", "foo bar\n".into()).unwrap();
/// let ConversionOutput::Allowlist(allowlist) = output else {
///     panic!("expected an allowlist");
/// };
/// assert_eq!(allowlist.items[0].gate, "foo");
/// ```
pub fn convert(kind: &str, input: ConversionInput) -> Result<ConversionOutput, ConversionError> {
    convert_with_config(kind, input, &ConverterConfig::default())
}

/// Convert an artifact using `config` for generated metadata
pub fn convert_with_config(
    kind: &str,
    input: ConversionInput,
    config: &ConverterConfig,
) -> Result<ConversionOutput, ConversionError> {
    let entry =
        lookup_entry(kind).ok_or_else(|| ConversionError::UnsupportedKind(kind.to_string()))?;

    if entry.kind == ArtifactKind::LEGACY_ALLOWLIST_ALIAS {
        tracing::debug!("'whitelist' is a legacy alias, converting as 'allowlist'");
    }
    tracing::debug!("Converting {} input for '{}'", input.shape(), entry.kind);

    entry.apply(&input, config)
}

/// Render a structured policy mapping as rule lines
pub fn policy_structured_to_text(value: &Value) -> Result<Vec<String>, ExportError> {
    PolicyTextExporter::new().export_value(value)
}

/// Parse policy text into a [`PolicyDocument`]
pub fn policy_text_to_structured(text: &str) -> Result<PolicyDocument, ImportError> {
    PolicyTextImporter::new().import(text)
}

/// Render a structured allowlist mapping as item lines
pub fn allowlist_structured_to_text(value: &Value) -> Result<Vec<String>, ExportError> {
    AllowlistTextExporter::new().export_value(value)
}

/// Parse allowlist text into an [`AllowlistDocument`]
pub fn allowlist_text_to_structured(text: &str) -> Result<AllowlistDocument, ImportError> {
    AllowlistTextImporter::new().import(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdFormat;
    use serde_json::json;

    #[test]
    fn test_table_covers_every_kind_and_shape() {
        for kind in ["policy", "allowlist", "whitelist"] {
            for shape in [InputShape::Text, InputShape::Structured] {
                let conversion = lookup_conversion(kind, shape);
                assert!(conversion.is_some(), "missing {} {}", kind, shape);
                assert_eq!(conversion.unwrap().shape(), shape);
            }
        }
        assert_eq!(conversion_table().len(), 3);
    }

    #[test]
    fn test_entry_applies_conversion_matching_input_shape() {
        let entry = lookup_entry("policy").unwrap();
        let config = ConverterConfig::default();

        let from_text = entry
            .apply(&ConversionInput::from("g:t:a"), &config)
            .unwrap();
        assert!(matches!(from_text, ConversionOutput::Policy(_)));

        let value = json!({"version": "1_0", "rules": [{"gate": "g", "trigger": "t", "action": "a"}]});
        let from_structured = entry.apply(&value.into(), &config).unwrap();
        assert_eq!(from_structured, ConversionOutput::Lines(vec!["g:t:a".to_string()]));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(lookup_conversion("Policy", InputShape::Text).is_some());
        assert!(lookup_conversion(" WHITELIST ", InputShape::Structured).is_some());
        assert!(lookup_conversion("bundle", InputShape::Text).is_none());
    }

    #[test]
    fn test_convert_policy_text() {
        let output = convert("policy", "dockerfile:expose:stop:port=22\n".into()).unwrap();
        let ConversionOutput::Policy(policy) = output else {
            panic!("expected policy output");
        };
        assert_eq!(policy.rules.len(), 1);
        assert_eq!(policy.rules[0].trigger, "expose");
    }

    #[test]
    fn test_convert_policy_structured() {
        let value = json!({
            "version": "1_0",
            "rules": [{
                "gate": "dockerfile",
                "trigger": "expose",
                "action": "stop",
                "params": [{"name": "port", "value": "22"}]
            }]
        });
        let output = convert("policy", value.into()).unwrap();
        assert_eq!(
            output,
            ConversionOutput::Lines(vec!["dockerfile:expose:stop:port=22 ".to_string()])
        );
        assert_eq!(
            output.to_text().unwrap(),
            "dockerfile:expose:stop:port=22 \n"
        );
    }

    #[test]
    fn test_convert_unknown_kind() {
        let err = convert("bundle", "x".into()).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedKind(kind) if kind == "bundle"));
    }

    #[test]
    fn test_convert_malformed_rule_is_import_error() {
        let err = convert("policy", "onlyonecolon:bar".into()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::ImportError(ImportError::MalformedRule { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_convert_with_config_uses_id_format() {
        let config = ConverterConfig {
            id_format: IdFormat::Simple,
            ..Default::default()
        };
        let output = convert_with_config("allowlist", "foo bar".into(), &config).unwrap();
        let ConversionOutput::Allowlist(allowlist) = output else {
            panic!("expected allowlist output");
        };
        assert_eq!(allowlist.id.len(), 32);
        assert!(!allowlist.id.contains('-'));
    }

    #[test]
    fn test_output_to_json_value() {
        let output = convert("allowlist", "foo bar".into()).unwrap();
        let value = output.to_json_value().unwrap();
        assert_eq!(value["version"], "1_0");
        assert_eq!(value["items"][0]["trigger_id"], "bar");
    }
}
