//! Recursive removal of JSON Schema keywords that strict providers reject.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{trace, Level};

use crate::config::{AdapterConfig, DEFAULT_DENIED_KEYWORDS};

static DEFAULT_SANITIZER: Lazy<SchemaSanitizer> = Lazy::new(SchemaSanitizer::default);

/// Strips denied keywords at every level of a schema tree.
///
/// [`DEFAULT_DENIED_KEYWORDS`] are always denied; extra keywords can only be
/// added. Inputs are only read; the output is a fresh tree. Keys are matched
/// wherever they occur, so a property that happens to be named like a denied
/// keyword is removed as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSanitizer {
    denied: HashSet<String>,
}

impl Default for SchemaSanitizer {
    fn default() -> Self {
        Self::with_extra_keywords(std::iter::empty::<String>())
    }
}

impl SchemaSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed denylist plus `extra`.
    pub fn with_extra_keywords<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denied: DEFAULT_DENIED_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .chain(extra.into_iter().map(Into::into))
                .collect(),
        }
    }

    pub fn from_config(config: &AdapterConfig) -> Self {
        Self::with_extra_keywords(config.extra_denied_keywords.iter().map(String::as_str))
    }

    pub fn is_denied(&self, key: &str) -> bool {
        self.denied.contains(key)
    }

    /// Denied keywords in sorted order.
    pub fn denied_keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.denied.iter().map(String::as_str).collect();
        keywords.sort_unstable();
        keywords
    }

    /// Sanitize a schema tree.
    pub fn sanitize(&self, tree: &Map<String, Value>) -> Map<String, Value> {
        self.sanitize_map(tree, root_path().as_deref())
    }

    /// Sanitize any JSON value; primitives are returned unchanged.
    pub fn sanitize_value(&self, value: &Value) -> Value {
        self.sanitize_at(value, root_path().as_deref())
    }

    // `path` is only tracked while TRACE is enabled.
    fn sanitize_map(&self, tree: &Map<String, Value>, path: Option<&str>) -> Map<String, Value> {
        let mut out = Map::new();
        for (key, value) in tree {
            let child = path.map(|p| format!("{p}/{}", escape_pointer(key)));
            if self.is_denied(key) {
                if let Some(child) = &child {
                    trace!(keyword = %key, path = %child, "stripping schema keyword");
                }
                continue;
            }
            out.insert(key.clone(), self.sanitize_at(value, child.as_deref()));
        }
        out
    }

    fn sanitize_at(&self, value: &Value, path: Option<&str>) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.sanitize_map(map, path)),
            // Only tree elements are descended into; nested arrays stay as they are.
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| match item {
                        Value::Object(map) => {
                            let child = path.map(|p| format!("{p}/{idx}"));
                            Value::Object(self.sanitize_map(map, child.as_deref()))
                        }
                        other => other.clone(),
                    })
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

/// Sanitize with the default denylist.
pub fn sanitize_schema(schema: &Value) -> Value {
    DEFAULT_SANITIZER.sanitize_value(schema)
}

fn root_path() -> Option<String> {
    tracing::enabled!(Level::TRACE).then(String::new)
}

// RFC 6901 escaping, only used for log output.
fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contains_key_anywhere(value: &Value, key: &str) -> bool {
        match value {
            Value::Object(map) => {
                map.contains_key(key) || map.values().any(|v| contains_key_anywhere(v, key))
            }
            Value::Array(items) => items.iter().any(|v| contains_key_anywhere(v, key)),
            _ => false,
        }
    }

    #[test]
    fn test_strips_every_default_keyword_at_top_level() {
        let schema = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "string",
            "minLength": 1,
            "maxLength": 10,
            "pattern": "^a",
            "format": "email",
            "default": "a@b.c"
        });
        assert_eq!(sanitize_schema(&schema), json!({"type": "string"}));
    }

    #[test]
    fn test_strips_nested_properties_and_items() {
        let schema = json!({
            "type": "object",
            "properties": {
                "tags": {
                    "type": "array",
                    "minItems": 1,
                    "maxItems": 5,
                    "items": {"type": "string", "maxLength": 20}
                },
                "score": {
                    "type": "number",
                    "exclusiveMinimum": 0,
                    "exclusiveMaximum": 100,
                    "description": "keep me"
                }
            },
            "required": ["tags"]
        });
        let expected = json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}},
                "score": {"type": "number", "description": "keep me"}
            },
            "required": ["tags"]
        });
        let sanitized = sanitize_schema(&schema);
        assert_eq!(sanitized, expected);
        for keyword in DEFAULT_DENIED_KEYWORDS {
            assert!(!contains_key_anywhere(&sanitized, keyword), "{keyword} survived");
        }
    }

    #[test]
    fn test_sanitizes_tree_elements_of_arrays() {
        let schema = json!({
            "anyOf": [
                {"type": "string", "format": "uri"},
                {"type": "integer", "default": 3}
            ],
            "enum": ["a", 1, null],
            "examples": [[{"format": "kept-in-nested-array"}]]
        });
        let sanitized = sanitize_schema(&schema);
        assert_eq!(
            sanitized["anyOf"],
            json!([{"type": "string"}, {"type": "integer"}])
        );
        assert_eq!(sanitized["enum"], json!(["a", 1, null]));
        assert_eq!(
            sanitized["examples"],
            json!([[{"format": "kept-in-nested-array"}]])
        );
    }

    #[test]
    fn test_clean_schema_is_unchanged() {
        let schema = json!({
            "type": "object",
            "description": "search request",
            "properties": {
                "query": {"type": "string", "enum": ["a", "b"]},
                "filters": {
                    "type": "array",
                    "items": {"type": "object", "properties": {"k": {"type": "string"}}}
                }
            },
            "required": ["query"],
            "additionalProperties": false
        });
        assert_eq!(sanitize_schema(&schema), schema);
    }

    #[test]
    fn test_empty_tree_and_primitives() {
        let sanitizer = SchemaSanitizer::default();
        assert!(sanitizer.sanitize(&Map::new()).is_empty());
        assert_eq!(sanitizer.sanitize_value(&json!(42)), json!(42));
        assert_eq!(sanitizer.sanitize_value(&json!("format")), json!("format"));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let schema = json!({"type": "string", "minLength": 3});
        let before = schema.clone();
        let _ = sanitize_schema(&schema);
        assert_eq!(schema, before);
    }

    #[test]
    fn test_custom_denylist_from_config() {
        let config = AdapterConfig::default().with_extra_denied_keyword("additionalProperties");
        let sanitizer = SchemaSanitizer::from_config(&config);
        assert!(sanitizer.is_denied("additionalProperties"));
        assert!(sanitizer.is_denied("minLength"));
        let out = sanitizer.sanitize_value(&json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {"a": {"type": "object", "additionalProperties": true}}
        }));
        assert_eq!(
            out,
            json!({"type": "object", "properties": {"a": {"type": "object"}}})
        );
    }

    #[test]
    fn test_property_named_like_keyword_is_removed() {
        let out = sanitize_schema(&json!({
            "type": "object",
            "properties": {"format": {"type": "string"}, "name": {"type": "string"}}
        }));
        assert_eq!(out["properties"], json!({"name": {"type": "string"}}));
    }

    #[test]
    fn test_denied_keywords_sorted() {
        let sanitizer = SchemaSanitizer::with_extra_keywords(["zeta", "alpha"]);
        let keywords = sanitizer.denied_keywords();
        assert_eq!(keywords.first(), Some(&"$schema"));
        assert_eq!(keywords.last(), Some(&"zeta"));
        assert!(keywords.contains(&"alpha"));
    }

    #[test]
    fn test_extra_keywords_never_replace_fixed_list() {
        let sanitizer = SchemaSanitizer::with_extra_keywords(["format"]);
        for keyword in DEFAULT_DENIED_KEYWORDS {
            assert!(sanitizer.is_denied(keyword), "{keyword} not denied");
        }
        assert_eq!(sanitizer.denied_keywords().len(), DEFAULT_DENIED_KEYWORDS.len());
    }

    #[test]
    fn test_same_output_with_trace_logging_enabled() {
        let schema = json!({
            "$schema": "x",
            "type": "object",
            "properties": {"a/b": {"type": "string", "pattern": "^x"}},
            "anyOf": [{"format": "uri", "type": "string"}]
        });
        let quiet = sanitize_schema(&schema);

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .finish();
        let traced = tracing::subscriber::with_default(subscriber, || sanitize_schema(&schema));

        assert_eq!(quiet, traced);
        assert_eq!(
            traced,
            json!({
                "type": "object",
                "properties": {"a/b": {"type": "string"}},
                "anyOf": [{"type": "string"}]
            })
        );
    }

    #[test]
    fn test_escape_pointer() {
        assert_eq!(escape_pointer("a/b~c"), "a~1b~0c");
    }
}
