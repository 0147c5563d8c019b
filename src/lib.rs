//! # ai-lib-tool-compat
//!
//! 工具兼容层：让为某一模型厂商编写的工具定义可以在 JSON Schema 解析更严格的厂商上使用。
//!
//! Tool compatibility layer for AI-Protocol runtimes. Adapts tool collections
//! written against one provider so they keep working with providers that
//! reject common JSON Schema keywords or cannot read structured tool results.
//!
//! ## Overview
//!
//! Adaptation performs two transformations on every tool:
//!
//! - **Schema sanitation**: keywords such as `minLength`, `pattern`, `format`
//!   and `$schema` are stripped at every nesting level of the input schema.
//! - **Result flattening**: the execution function is wrapped so content-block
//!   results (`[{"type": "text", "text": ...}]`, optionally under a
//!   `"content"` key) come back as a single string.
//!
//! The input collection is never modified; adaptation returns a new one.
//!
//! ## Quick Start
//!
//! ```rust
//! use ai_lib_tool_compat::{adapt_tools, InputSchema, Tool, ToolCollection};
//! use serde_json::json;
//!
//! # fn main() -> ai_lib_tool_compat::Result<()> {
//! let tools = ToolCollection::new().with_tool(
//!     "search",
//!     Tool::new(json!({
//!         "$schema": "http://json-schema.org/draft-07/schema#",
//!         "type": "object",
//!         "properties": {"query": {"type": "string", "minLength": 1}}
//!     }))
//!     .with_execute(|args| async move {
//!         Ok(json!({"content": [{"type": "text", "text": format!("results for {}", args["query"])}]}))
//!     }),
//! );
//!
//! let adapted = adapt_tools(&tools)?;
//! assert_eq!(
//!     adapted.get("search").unwrap().input_schema,
//!     InputSchema::Json(json!({
//!         "type": "object",
//!         "properties": {"query": {"type": "string"}}
//!     }))
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Tool records, collections, calls and definitions |
//! | [`schema`] | Canonicalization collaborators and keyword sanitizer |
//! | [`content`] | Result classification and flattening |
//! | [`adapter`] | The tool adapter and its builder |
//! | [`config`] | Adapter configuration (YAML/JSON) |
//! | [`mcp`] | MCP server tools as a tool collection |

pub mod adapter;
pub mod config;
pub mod content;
pub mod mcp;
pub mod schema;
pub mod types;

pub use adapter::{adapt_tools, ToolAdapter, ToolAdapterBuilder};
pub use config::AdapterConfig;
pub use content::{flatten_content, ContentFlattener};
pub use schema::{sanitize_schema, SchemaSanitizer};
pub use types::{InputSchema, Tool, ToolCall, ToolCollection, ToolDefinition, ToolResult};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
