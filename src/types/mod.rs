//! 类型系统模块：工具记录与工具集合。
//!
//! # Types Module
//!
//! Strongly-typed representations of the tools this crate adapts and of the
//! host-facing call/result/definition shapes.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Tool`] | Input schema, async execution function, optional render hook |
//! | [`InputSchema`] | Schema descriptor (JSON, schemars-typed, raw text, none) |
//! | [`ToolCollection`] | Tools keyed by unique name |
//! | [`ToolCall`] / [`ToolResult`] | Invocation from the model and its answer |
//! | [`ToolDefinition`] | Function-calling definition handed to model APIs |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_tool_compat::types::{Tool, ToolCollection};
//! use serde_json::json;
//!
//! let tools = ToolCollection::new().with_tool(
//!     "get_weather",
//!     Tool::new(json!({
//!         "type": "object",
//!         "properties": { "location": { "type": "string" } }
//!     }))
//!     .with_description("Get current weather for a location")
//!     .with_execute(|args| async move { Ok(json!(format!("sunny in {}", args["location"]))) }),
//! );
//! assert_eq!(tools.len(), 1);
//! ```

pub mod tool;

pub use tool::{
    ExecuteFn, FunctionDefinition, InputSchema, RenderFn, Tool, ToolCall, ToolCollection,
    ToolDefinition, ToolFuture, ToolResult,
};
