//! Classification of raw tool results into typed shapes.

use serde_json::Value;

/// One element of a content-block sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentBlock<'a> {
    /// `{"type": "text", "text": <string>}`; extra fields are ignored.
    Text(&'a str),
    /// Anything else (images, resources, malformed blocks, primitives).
    Other(&'a Value),
}

impl<'a> ContentBlock<'a> {
    pub fn classify(value: &'a Value) -> Self {
        let text = value
            .as_object()
            .filter(|obj| obj.get("type").and_then(Value::as_str) == Some("text"))
            .and_then(|obj| obj.get("text"))
            .and_then(Value::as_str);
        match text {
            Some(text) => ContentBlock::Text(text),
            None => ContentBlock::Other(value),
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            ContentBlock::Text(text) => Some(text),
            ContentBlock::Other(_) => None,
        }
    }
}

/// Shape of a raw execution result.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult<'a> {
    /// Already plain text.
    Text(&'a str),
    /// Object carrying a block sequence under `"content"`.
    Wrapped(Vec<ContentBlock<'a>>),
    /// Bare block sequence.
    Blocks(Vec<ContentBlock<'a>>),
    Other(&'a Value),
}

impl<'a> ExecutionResult<'a> {
    /// The only place that inspects the shape of a raw result.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(text) => ExecutionResult::Text(text.as_str()),
            Value::Object(obj) => match obj.get("content") {
                Some(Value::Array(items)) => ExecutionResult::Wrapped(classify_all(items)),
                _ => ExecutionResult::Other(value),
            },
            Value::Array(items) => ExecutionResult::Blocks(classify_all(items)),
            other => ExecutionResult::Other(other),
        }
    }

    /// Recognized text blocks in order; empty for non-block shapes.
    pub fn texts(&self) -> Vec<&'a str> {
        match self {
            ExecutionResult::Wrapped(blocks) | ExecutionResult::Blocks(blocks) => {
                blocks.iter().filter_map(ContentBlock::as_text).collect()
            }
            ExecutionResult::Text(_) | ExecutionResult::Other(_) => Vec::new(),
        }
    }
}

fn classify_all(items: &[Value]) -> Vec<ContentBlock<'_>> {
    items.iter().map(ContentBlock::classify).collect()
}
