//! Tool adapter: sanitized schemas plus flattened results.
//!
//! Every adapted tool keeps its name and description. Its schema is
//! canonicalized, sanitized and rebuilt; its execution function is wrapped so
//! the caller always receives a JSON string; its render hook is dropped
//! because the wrapper already produces the final text.
//!
//! ```
//! use ai_lib_tool_compat::adapter::adapt_tools;
//! use ai_lib_tool_compat::types::{InputSchema, Tool, ToolCollection};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let tools = ToolCollection::new().with_tool(
//!     "lookup",
//!     Tool::new(json!({"type": "string", "minLength": 3}))
//!         .with_execute(|_| async move { Ok(json!([{"type": "text", "text": "result"}])) }),
//! );
//!
//! let adapted = adapt_tools(&tools).unwrap();
//! let tool = adapted.get("lookup").unwrap();
//! assert_eq!(tool.input_schema, InputSchema::Json(json!({"type": "string"})));
//! assert_eq!(tool.invoke(json!({})).unwrap().await.unwrap(), json!("result"));
//! # });
//! ```

mod builder;

pub use builder::ToolAdapterBuilder;

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::config::AdapterConfig;
use crate::content::ContentFlattener;
use crate::schema::{
    JsonSchemaConstructor, SchemaCanonicalizer, SchemaConstructor, SchemaSanitizer,
    StandardCanonicalizer,
};
use crate::types::{ExecuteFn, Tool, ToolCollection, ToolFuture};
use crate::{Error, Result};

/// Adapts tool collections for providers with strict schema parsing.
pub struct ToolAdapter {
    sanitizer: SchemaSanitizer,
    flattener: Arc<ContentFlattener>,
    canonicalizer: Arc<dyn SchemaCanonicalizer>,
    constructor: Arc<dyn SchemaConstructor>,
}

impl ToolAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ToolAdapterBuilder {
        ToolAdapterBuilder::new()
    }

    pub fn sanitizer(&self) -> &SchemaSanitizer {
        &self.sanitizer
    }

    pub fn flattener(&self) -> &ContentFlattener {
        &self.flattener
    }

    /// Adapt every tool, producing a new collection under the same names.
    ///
    /// A canonicalization failure on any tool fails the whole call.
    pub fn adapt(&self, tools: &ToolCollection) -> Result<ToolCollection> {
        tools
            .iter()
            .map(|(name, tool)| -> Result<(String, Tool)> {
                Ok((name.clone(), self.adapt_tool(name, tool)?))
            })
            .collect()
    }

    /// Adapt a single tool; `name` is only used for diagnostics.
    pub fn adapt_tool(&self, name: &str, tool: &Tool) -> Result<Tool> {
        let canonical = self
            .canonicalizer
            .canonicalize(&tool.input_schema)
            .map_err(|e| e.at_field(format!("tools.{name}.input_schema")))?;

        let sanitized = canonical.is_some();
        let input_schema = match canonical {
            Some(tree) => self.constructor.construct(self.sanitizer.sanitize(&tree)),
            None => {
                debug!(tool = name, "no canonical schema, keeping original descriptor");
                tool.input_schema.clone()
            }
        };

        let execute = tool
            .execute
            .as_ref()
            .map(|execute| wrap_execute(Arc::clone(execute), Arc::clone(&self.flattener)));

        debug!(
            tool = name,
            sanitized,
            wrapped = execute.is_some(),
            dropped_render_hook = tool.render_result.is_some(),
            "adapted tool"
        );

        Ok(Tool {
            description: tool.description.clone(),
            input_schema,
            execute,
            render_result: None,
        })
    }
}

impl Default for ToolAdapter {
    fn default() -> Self {
        let config = AdapterConfig::default();
        Self {
            sanitizer: SchemaSanitizer::from_config(&config),
            flattener: Arc::new(ContentFlattener::from_config(&config)),
            canonicalizer: Arc::new(StandardCanonicalizer),
            constructor: Arc::new(JsonSchemaConstructor),
        }
    }
}

/// Wrap an execution function so its result is flattened to a JSON string.
///
/// Errors from the original function are returned untouched; nothing runs
/// after the inner future resolves except the flattening itself.
pub fn wrap_execute(execute: ExecuteFn, flattener: Arc<ContentFlattener>) -> ExecuteFn {
    Arc::new(move |arguments| -> ToolFuture {
        let pending = execute(arguments);
        let flattener = Arc::clone(&flattener);
        Box::pin(async move {
            let result = pending.await?;
            Ok::<_, Error>(Value::String(flattener.flatten(&result)))
        })
    })
}

/// Adapt with the default configuration and collaborators.
pub fn adapt_tools(tools: &ToolCollection) -> Result<ToolCollection> {
    ToolAdapter::default().adapt(tools)
}
