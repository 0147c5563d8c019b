//! Flattening of tool results into a single string.

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::trace;

use super::block::ExecutionResult;
use crate::config::{AdapterConfig, DEFAULT_TEXT_SEPARATOR};

static DEFAULT_FLATTENER: Lazy<ContentFlattener> = Lazy::new(ContentFlattener::default);

/// Turns any execution result into plain text.
///
/// Text blocks win; any shape without text blocks is returned as compact
/// JSON so nothing is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFlattener {
    separator: String,
}

impl Default for ContentFlattener {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_SEPARATOR)
    }
}

impl ContentFlattener {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn from_config(config: &AdapterConfig) -> Self {
        Self::new(config.text_separator.clone())
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn flatten(&self, result: &Value) -> String {
        let classified = ExecutionResult::classify(result);
        if let ExecutionResult::Text(text) = classified {
            return text.to_string();
        }

        let texts = classified.texts();
        if !texts.is_empty() {
            return texts.join(self.separator.as_str());
        }

        trace!("no text content blocks in tool result, encoding as JSON");
        result.to_string()
    }
}

/// Flatten with the default newline separator.
pub fn flatten_content(result: &Value) -> String {
    DEFAULT_FLATTENER.flatten(result)
}
