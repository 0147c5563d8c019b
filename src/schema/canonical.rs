//! Schema canonicalization and construction collaborators.
//!
//! The adapter never inspects [`InputSchema`] variants itself. A
//! [`SchemaCanonicalizer`] turns a descriptor into a plain JSON Schema tree
//! and a [`SchemaConstructor`] turns the sanitized tree back into a
//! descriptor. Both can be replaced on the adapter builder; closures with the
//! matching signature implement the traits.

use serde_json::{Map, Value};

use crate::error::ErrorContext;
use crate::types::InputSchema;
use crate::{Error, Result};

pub trait SchemaCanonicalizer: Send + Sync {
    /// Canonical JSON Schema tree, or `None` when the descriptor has no
    /// tree-shaped form. Errors abort adaptation.
    fn canonicalize(&self, schema: &InputSchema) -> Result<Option<Map<String, Value>>>;
}

pub trait SchemaConstructor: Send + Sync {
    fn construct(&self, tree: Map<String, Value>) -> InputSchema;
}

impl<F> SchemaCanonicalizer for F
where
    F: Fn(&InputSchema) -> Result<Option<Map<String, Value>>> + Send + Sync,
{
    fn canonicalize(&self, schema: &InputSchema) -> Result<Option<Map<String, Value>>> {
        self(schema)
    }
}

impl<F> SchemaConstructor for F
where
    F: Fn(Map<String, Value>) -> InputSchema + Send + Sync,
{
    fn construct(&self, tree: Map<String, Value>) -> InputSchema {
        self(tree)
    }
}

/// Handles every built-in [`InputSchema`] form.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardCanonicalizer;

impl SchemaCanonicalizer for StandardCanonicalizer {
    fn canonicalize(&self, schema: &InputSchema) -> Result<Option<Map<String, Value>>> {
        let value = match schema {
            InputSchema::Json(value) => return Ok(value.as_object().cloned()),
            InputSchema::Unspecified => return Ok(None),
            InputSchema::Typed(root) => serde_json::to_value(root).map_err(|e| {
                Error::canonicalization_with_context(
                    format!("failed to serialize generated schema: {e}"),
                    ErrorContext::new().with_source("schemars"),
                )
            })?,
            InputSchema::Raw(text) => serde_json::from_str::<Value>(text).map_err(|e| {
                Error::canonicalization_with_context(
                    format!("schema text is not valid JSON: {e}"),
                    ErrorContext::new()
                        .with_details(format!("line {}, column {}", e.line(), e.column()))
                        .with_source("raw_schema"),
                )
            })?,
        };
        match value {
            Value::Object(map) => Ok(Some(map)),
            _ => Ok(None),
        }
    }
}

/// Builds plain [`InputSchema::Json`] descriptors.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSchemaConstructor;

impl SchemaConstructor for JsonSchemaConstructor {
    fn construct(&self, tree: Map<String, Value>) -> InputSchema {
        InputSchema::Json(Value::Object(tree))
    }
}
