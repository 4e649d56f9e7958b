//! Format converter module
//!
//! Provides the conversion dispatch table between the text and structured
//! forms of policies and allowlists.

pub mod converter;

pub use converter::{
    Conversion, ConversionEntry, ConversionError, ConversionInput, ConversionOutput, InputShape,
    StructuredConversion, TextConversion, allowlist_structured_to_text,
    allowlist_text_to_structured, conversion_table, convert, convert_with_config,
    lookup_conversion, lookup_entry, policy_structured_to_text, policy_text_to_structured,
};
