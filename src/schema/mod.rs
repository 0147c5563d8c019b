//! Schema handling: canonicalization collaborators and keyword sanitation.
//!
//! ```
//! use ai_lib_tool_compat::schema::sanitize_schema;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string", "minLength": 3, "format": "hostname"}
//!     }
//! });
//!
//! let sanitized = sanitize_schema(&schema);
//! assert_eq!(sanitized["properties"]["name"], json!({"type": "string"}));
//! ```

pub mod canonical;
pub mod sanitize;

pub use canonical::{JsonSchemaConstructor, SchemaCanonicalizer, SchemaConstructor, StandardCanonicalizer};
pub use sanitize::{sanitize_schema, SchemaSanitizer};
