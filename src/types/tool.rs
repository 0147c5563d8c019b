//! Tool records, tool collections and the host-facing call/definition types.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::{Error, Result};

/// Future returned by a tool's execution function.
pub type ToolFuture = BoxFuture<'static, Result<Value>>;

/// Asynchronous execution function: JSON arguments in, raw result out.
pub type ExecuteFn = Arc<dyn Fn(Value) -> ToolFuture + Send + Sync>;

/// Hook a host runtime uses to serialize a raw result for the model.
pub type RenderFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Input-schema descriptor in whichever form the tool was registered with.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSchema {
    /// Plain JSON Schema value.
    Json(Value),
    /// Schema generated from a Rust type.
    Typed(schemars::schema::RootSchema),
    /// Serialized JSON Schema text.
    Raw(String),
    /// No schema at all.
    Unspecified,
}

impl InputSchema {
    /// Schema generated from `T` via schemars.
    pub fn from_type<T: schemars::JsonSchema>() -> Self {
        InputSchema::Typed(schemars::schema_for!(T))
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, InputSchema::Unspecified)
    }

    /// Render the descriptor as a JSON value, if it has one.
    pub fn to_json(&self) -> Result<Option<Value>> {
        match self {
            InputSchema::Json(value) => Ok(Some(value.clone())),
            InputSchema::Typed(root) => Ok(Some(serde_json::to_value(root)?)),
            InputSchema::Raw(text) => Ok(Some(serde_json::from_str(text)?)),
            InputSchema::Unspecified => Ok(None),
        }
    }
}

impl From<Value> for InputSchema {
    fn from(value: Value) -> Self {
        InputSchema::Json(value)
    }
}

impl From<Map<String, Value>> for InputSchema {
    fn from(map: Map<String, Value>) -> Self {
        InputSchema::Json(Value::Object(map))
    }
}

/// A model-invocable capability.
///
/// Closures are reference counted, so cloning a tool is cheap and never
/// duplicates the underlying implementation.
#[derive(Clone)]
pub struct Tool {
    pub description: Option<String>,
    pub input_schema: InputSchema,
    pub execute: Option<ExecuteFn>,
    pub render_result: Option<RenderFn>,
}

impl Tool {
    pub fn new(input_schema: impl Into<InputSchema>) -> Self {
        Self {
            description: None,
            input_schema: input_schema.into(),
            execute: None,
            render_result: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an async execution function.
    pub fn with_execute<F, Fut>(mut self, execute: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.execute = Some(Arc::new(move |args| -> ToolFuture { Box::pin(execute(args)) }));
        self
    }

    /// Attach an already boxed execution function.
    pub fn with_execute_fn(mut self, execute: ExecuteFn) -> Self {
        self.execute = Some(execute);
        self
    }

    pub fn with_render_result<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.render_result = Some(Arc::new(render));
        self
    }

    pub fn is_executable(&self) -> bool {
        self.execute.is_some()
    }

    /// Start an invocation, or `None` when the tool has no execution function.
    pub fn invoke(&self, arguments: Value) -> Option<ToolFuture> {
        self.execute.as_ref().map(|execute| execute(arguments))
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("execute", &self.execute.as_ref().map(|_| "<fn>"))
            .field("render_result", &self.render_result.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Tools keyed by their unique name.
#[derive(Debug, Clone, Default)]
pub struct ToolCollection {
    tools: HashMap<String, Tool>,
}

impl ToolCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tool, returning the one previously registered under `name`.
    pub fn insert(&mut self, name: impl Into<String>, tool: Tool) -> Option<Tool> {
        self.tools.insert(name.into(), tool)
    }

    pub fn with_tool(mut self, name: impl Into<String>, tool: Tool) -> Self {
        self.insert(name, tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Tool> {
        self.tools.remove(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Tool)> {
        self.tools.iter()
    }

    /// Tool names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Function-calling definitions for every tool, sorted by name.
    pub fn definitions(&self) -> Result<Vec<ToolDefinition>> {
        self.names()
            .into_iter()
            .map(|name| {
                let tool = &self.tools[name];
                let parameters = tool
                    .input_schema
                    .to_json()
                    .map_err(|e| match e {
                        Error::Serialization(e) => Error::canonicalization(format!(
                            "input schema of `{name}` is not valid JSON: {e}"
                        ))
                        .at_field(format!("tools.{name}.input_schema")),
                        other => other,
                    })?;
                Ok(ToolDefinition {
                    tool_type: "function".to_string(),
                    function: FunctionDefinition {
                        name: name.to_string(),
                        description: tool.description.clone(),
                        parameters,
                    },
                })
            })
            .collect()
    }

    /// Run a tool call the way a host runtime does.
    ///
    /// The render hook, when present, turns the raw result into the text sent
    /// back to the model; otherwise the raw value is passed through. Failures
    /// raised by the tool are reported as an error result; unknown or
    /// non-executable tools are returned as `Err`.
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| Error::ToolNotFound(call.name.clone()))?;
        let pending = tool
            .invoke(call.arguments.clone())
            .ok_or_else(|| Error::NotExecutable(call.name.clone()))?;

        match pending.await {
            Ok(output) => {
                let content = match &tool.render_result {
                    Some(render) => Value::String(render(&output)),
                    None => output,
                };
                Ok(ToolResult {
                    tool_use_id: call.id.clone(),
                    content,
                    is_error: false,
                })
            }
            Err(err) => Ok(ToolResult::failure(&call.id, &err)),
        }
    }
}

impl FromIterator<(String, Tool)> for ToolCollection {
    fn from_iter<I: IntoIterator<Item = (String, Tool)>>(iter: I) -> Self {
        Self {
            tools: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ToolCollection {
    type Item = (String, Tool);
    type IntoIter = std::collections::hash_map::IntoIter<String, Tool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.into_iter()
    }
}

impl<'a> IntoIterator for &'a ToolCollection {
    type Item = (&'a String, &'a Tool);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Tool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}

/// Tool definition (for function calling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Option<Value>, // JSON Schema
}

/// Tool call (invocation from model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// Tool result (response to tool call)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: Value,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn failure(tool_use_id: &str, error: &Error) -> Self {
        Self {
            tool_use_id: tool_use_id.to_string(),
            content: serde_json::json!({ "error": error.to_string() }),
            is_error: true,
        }
    }
}
