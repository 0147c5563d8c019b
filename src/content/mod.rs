//! Tool result content handling.
//!
//! Tool-calling protocols such as MCP return results as sequences of typed
//! content blocks. Raw results are first classified into
//! [`ExecutionResult`] and then flattened to a single string.
//!
//! ```
//! use ai_lib_tool_compat::content::flatten_content;
//! use serde_json::json;
//!
//! let result = json!({"content": [{"type": "text", "text": "42 rows"}]});
//! assert_eq!(flatten_content(&result), "42 rows");
//! ```

pub mod block;
pub mod flatten;

pub use block::{ContentBlock, ExecutionResult};
pub use flatten::{flatten_content, ContentFlattener};
