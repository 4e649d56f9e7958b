//! Policy document model
//!
//! A policy is an ordered list of rules. In text form each rule is one line:
//!
//! ```text
//! # comment
//! dockerfile:expose:stop:port=22 
//! dockerfile:from:warn
//! ```
//!
//! Fields are positional: `gate`, `trigger`, `action`, then an optional block of
//! space-separated `name=value` params.

use serde::{Deserialize, Serialize};

use super::metadata::GeneratedMetadata;
use super::{PARAM_ASSIGN, PARAM_SEPARATOR, RULE_FIELD_SEPARATOR, SUPPORTED_VERSION};

/// Named parameter of a rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether this param survives a trip through the text form
    ///
    /// A space anywhere, or an `=` in the name, would split the token
    /// differently on re-import.
    pub fn is_text_representable(&self) -> bool {
        !self.name.contains(PARAM_SEPARATOR)
            && !self.name.contains(PARAM_ASSIGN)
            && !self.value.contains(PARAM_SEPARATOR)
    }
}

impl std::str::FromStr for Param {
    type Err = RuleParseError;

    /// Parse a `name=value` token, splitting at the first `=`
    ///
    /// Either side may be empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, value)) = s.split_once(PARAM_ASSIGN) else {
            return Err(RuleParseError::MissingParamAssign {
                token: s.to_string(),
            });
        };
        Ok(Param::new(name, value))
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.name, PARAM_ASSIGN, self.value)
    }
}

/// One policy rule: fire `action` when `trigger` of `gate` matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Check category
    pub gate: String,
    /// Specific check within the gate
    pub trigger: String,
    /// Action to take (e.g. stop, warn, go)
    pub action: String,
    /// Optional trigger parameters, in order
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub params: Vec<Param>,
}

impl Rule {
    pub fn new(
        gate: impl Into<String>,
        trigger: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            gate: gate.into(),
            trigger: trigger.into(),
            action: action.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(Param::new(name, value));
        self
    }
}

/// Why a rule line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    #[error("expected at least 3 ':'-separated fields (gate:trigger:action), found {found}")]
    MissingFields { found: usize },
    #[error("parameter '{token}' has no '=' separator")]
    MissingParamAssign { token: String },
}

impl std::str::FromStr for Rule {
    type Err = RuleParseError;

    /// Parse a single rule line
    ///
    /// Everything after the third `:` is the params block, so a `:` inside a
    /// param value is preserved. Empty tokens in the params block (repeated or
    /// trailing spaces) are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.splitn(4, RULE_FIELD_SEPARATOR);
        let (Some(gate), Some(trigger), Some(action)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(RuleParseError::MissingFields {
                found: s.split(RULE_FIELD_SEPARATOR).count(),
            });
        };

        let params = match fields.next() {
            Some(block) => block
                .split(PARAM_SEPARATOR)
                .filter(|token| !token.is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Param>, _>>()?,
            None => Vec::new(),
        };

        Ok(Rule {
            gate: gate.to_string(),
            trigger: trigger.to_string(),
            action: action.to_string(),
            params,
        })
    }
}

impl std::fmt::Display for Rule {
    /// Render the rule as a text line
    ///
    /// Each param is followed by a single space, including the last one, so a
    /// rule with params always ends in a space.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.gate,
            self.trigger,
            self.action,
            sep = RULE_FIELD_SEPARATOR
        )?;
        if !self.params.is_empty() {
            write!(f, "{}", RULE_FIELD_SEPARATOR)?;
            for param in &self.params {
                write!(f, "{}{}", param, PARAM_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

/// Structured policy document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Document format version; only `1_0` is understood
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub rules: Vec<Rule>,
}

impl PolicyDocument {
    /// Create an empty `1_0` document stamped with generated metadata
    pub fn new(metadata: GeneratedMetadata) -> Self {
        Self {
            id: metadata.id,
            name: metadata.name,
            version: SUPPORTED_VERSION.to_string(),
            comment: metadata.comment,
            rules: Vec::new(),
        }
    }

    /// Append a rule
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Whether this document's version can be converted
    pub fn is_supported(&self) -> bool {
        self.version == SUPPORTED_VERSION
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
