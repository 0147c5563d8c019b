//! MCP 工具桥接模块：将 MCP 服务器工具转换为可适配的工具集合
//!
//! MCP (Model Context Protocol) tool bridge module. Turns the tools an MCP
//! server exposes into a [`ToolCollection`] that can be handed to
//! [`crate::adapter::ToolAdapter`].
//!
//! This module handles:
//! - MCP `tools/list` entries → [`Tool`] records (schema + execution function)
//! - Tool namespacing (`mcp__<server>__<tool>`) so several servers can coexist
//! - Tool filtering (allow/deny lists)
//! - Mapping MCP `isError` results to execution errors
//!
//! The transport is not handled here: callers plug in an [`McpToolCaller`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ErrorContext;
use crate::types::{InputSchema, Tool, ToolCall, ToolCollection};
use crate::{Error, Result};

/// An MCP tool as received from an MCP server's `tools/list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpTool {
    /// Tool name, unique within a server.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// JSON Schema describing the tool's input parameters.
    #[serde(default, rename = "inputSchema")]
    pub input_schema: Option<Value>,
}

/// An MCP tool invocation request (sent to an MCP server).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpToolInvocation {
    pub name: String,
    pub arguments: Value,
}

/// An MCP tool invocation result (received from an MCP server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolResult {
    /// Result content (may be text, images, or embedded resources).
    pub content: Vec<McpContent>,
    /// Optional structured payload alongside the content blocks.
    #[serde(
        default,
        rename = "structuredContent",
        skip_serializing_if = "Option::is_none"
    )]
    pub structured_content: Option<Value>,
    /// Whether the tool execution resulted in an error.
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

impl McpToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![McpContent::text(text)],
            structured_content: None,
            is_error: false,
        }
    }

    /// Text of all `"text"` blocks, newline separated.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// MCP content block within a tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpContent {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl McpContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: Some(text.into()),
            extra: HashMap::new(),
        }
    }
}

/// Transport seam: sends a `tools/call` to an MCP server.
#[async_trait]
pub trait McpToolCaller: Send + Sync {
    async fn call_tool(&self, invocation: McpToolInvocation) -> Result<McpToolResult>;
}

/// Tool bridge: converts MCP tool listings into a [`ToolCollection`].
#[derive(Debug)]
pub struct McpToolBridge {
    server_name: String,
    /// Namespace prefix for MCP tools (e.g., "mcp__servername__").
    namespace: String,
    /// Allowed tools (empty = all allowed).
    allow_filter: HashSet<String>,
    /// Denied tools.
    deny_filter: HashSet<String>,
}

impl McpToolBridge {
    /// Create a new bridge for a specific MCP server.
    pub fn new(server_name: &str) -> Self {
        Self {
            server_name: server_name.to_string(),
            namespace: format!("mcp__{}__", server_name),
            allow_filter: HashSet::new(),
            deny_filter: HashSet::new(),
        }
    }

    /// Set allowed tools filter.
    pub fn with_allow_filter(mut self, tools: impl IntoIterator<Item = String>) -> Self {
        self.allow_filter = tools.into_iter().collect();
        self
    }

    /// Set denied tools filter.
    pub fn with_deny_filter(mut self, tools: impl IntoIterator<Item = String>) -> Self {
        self.deny_filter = tools.into_iter().collect();
        self
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Build namespaced tools backed by `caller`.
    ///
    /// Execution functions return the raw MCP result
    /// (`{"content": [...], "isError": false}`); each tool also carries a
    /// render hook that joins the text blocks.
    pub fn to_tools(
        &self,
        mcp_tools: &[McpTool],
        caller: Arc<dyn McpToolCaller>,
    ) -> ToolCollection {
        mcp_tools
            .iter()
            .filter(|t| {
                let allowed = self.is_tool_allowed(&t.name);
                if !allowed {
                    debug!(server = %self.server_name, tool = %t.name, "MCP tool filtered out");
                }
                allowed
            })
            .map(|t| (self.namespaced_name(&t.name), self.convert_tool(t, Arc::clone(&caller))))
            .collect()
    }

    fn convert_tool(&self, tool: &McpTool, caller: Arc<dyn McpToolCaller>) -> Tool {
        let schema = tool
            .input_schema
            .clone()
            .map(InputSchema::Json)
            .unwrap_or(InputSchema::Unspecified);
        let original = tool.name.clone();
        let server = self.server_name.clone();

        let converted = Tool::new(schema)
            .with_execute(move |arguments| {
                let caller = Arc::clone(&caller);
                let server = server.clone();
                let invocation = McpToolInvocation {
                    name: original.clone(),
                    arguments,
                };
                async move {
                    let tool_name = invocation.name.clone();
                    let result = caller.call_tool(invocation).await?;
                    if result.is_error {
                        warn!(server = %server, tool = %tool_name, "MCP tool reported an error");
                        return Err(Error::execution_with_context(
                            result.joined_text(),
                            ErrorContext::new()
                                .with_field_path(tool_name)
                                .with_source(format!("mcp:{server}")),
                        ));
                    }
                    Ok::<_, Error>(serde_json::to_value(&result)?)
                }
            })
            .with_render_result(|raw| match McpToolResult::deserialize(raw) {
                Ok(result) => result.joined_text(),
                Err(_) => raw.to_string(),
            });

        match &tool.description {
            Some(description) => converted.with_description(description.clone()),
            None => converted,
        }
    }

    /// Convert a host `ToolCall` back to MCP invocation format.
    ///
    /// Strips the namespace prefix and extracts the original MCP tool name.
    pub fn protocol_call_to_mcp(&self, call: &ToolCall) -> Option<McpToolInvocation> {
        let original_name = self.strip_namespace(&call.name)?;
        Some(McpToolInvocation {
            name: original_name,
            arguments: call.arguments.clone(),
        })
    }

    /// Check if a tool name passes the allow/deny filters.
    fn is_tool_allowed(&self, name: &str) -> bool {
        if !self.deny_filter.is_empty() && self.deny_filter.contains(name) {
            return false;
        }
        if !self.allow_filter.is_empty() {
            return self.allow_filter.contains(name);
        }
        true
    }

    /// Add the server namespace prefix to a tool name.
    fn namespaced_name(&self, name: &str) -> String {
        format!("{}{}", self.namespace, name)
    }

    /// Strip the server namespace prefix from a namespaced tool name.
    fn strip_namespace(&self, namespaced: &str) -> Option<String> {
        namespaced.strip_prefix(&self.namespace).map(String::from)
    }
}
