//! Adapter configuration
//!
//! Every field is optional in YAML/JSON form; omitted fields fall back to the
//! built-in defaults. The fixed denylist always applies; configuration can
//! only extend it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ErrorContext;
use crate::{Error, Result};

/// JSON Schema keywords stripped at every nesting level, unconditionally.
pub const DEFAULT_DENIED_KEYWORDS: &[&str] = &[
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "pattern",
    "format",
    "default",
    "$schema",
];

/// Separator placed between text blocks when flattening tool results.
pub const DEFAULT_TEXT_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Keywords removed in addition to [`DEFAULT_DENIED_KEYWORDS`].
    pub extra_denied_keywords: Vec<String>,
    /// Must not be empty.
    pub text_separator: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            extra_denied_keywords: Vec::new(),
            text_separator: DEFAULT_TEXT_SEPARATOR.to_string(),
        }
    }
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_denied_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.extra_denied_keywords.push(keyword.into());
        self
    }

    pub fn with_text_separator(mut self, separator: impl Into<String>) -> Self {
        self.text_separator = separator.into();
        self
    }

    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, or from YAML for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let loaded = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        loaded.map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_source(path.display().to_string()),
            },
            other => other,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(idx) = self
            .extra_denied_keywords
            .iter()
            .position(|k| k.trim().is_empty())
        {
            return Err(Error::configuration_with_context(
                "keyword must not be empty",
                ErrorContext::new().with_field_path(format!("extra_denied_keywords[{idx}]")),
            ));
        }
        if self.text_separator.is_empty() {
            return Err(Error::configuration_with_context(
                "text separator must not be empty",
                ErrorContext::new().with_field_path("text_separator"),
            ));
        }
        Ok(())
    }

    /// The fixed denylist followed by the extra keywords, without duplicates.
    pub fn denylist(&self) -> Vec<&str> {
        let mut out: Vec<&str> = DEFAULT_DENIED_KEYWORDS.to_vec();
        for keyword in &self.extra_denied_keywords {
            if !out.contains(&keyword.as_str()) {
                out.push(keyword);
            }
        }
        out
    }
}
