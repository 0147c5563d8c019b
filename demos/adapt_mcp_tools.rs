//! MCP Tool Adaptation Example
//!
//! Bridges the tools of an (in-process) MCP server into a tool collection,
//! adapts the collection for a provider with a strict schema parser, and runs
//! one tool call the way a host runtime would.
//!
//! Run with `RUST_LOG=ai_lib_tool_compat=debug` to see each adaptation step.

use ai_lib_tool_compat::mcp::{
    McpTool, McpToolBridge, McpToolCaller, McpToolInvocation, McpToolResult,
};
use ai_lib_tool_compat::{AdapterConfig, ToolAdapter, ToolCall};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

struct WeatherServer;

#[async_trait]
impl McpToolCaller for WeatherServer {
    async fn call_tool(&self, invocation: McpToolInvocation) -> ai_lib_tool_compat::Result<McpToolResult> {
        let city = invocation.arguments["city"].as_str().unwrap_or("nowhere");
        let mut result = McpToolResult::text(format!("{city}: 18°C, light rain"));
        result
            .content
            .push(ai_lib_tool_compat::mcp::McpContent::text("wind 12 km/h NW"));
        Ok(result)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let listing: Vec<McpTool> = serde_json::from_value(json!([{
        "name": "forecast",
        "description": "Current weather for a city",
        "inputSchema": {
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "city": {"type": "string", "minLength": 2},
                "units": {"type": "string", "enum": ["metric", "imperial"], "default": "metric"}
            },
            "required": ["city"]
        }
    }]))?;

    let tools = McpToolBridge::new("weather").to_tools(&listing, Arc::new(WeatherServer));

    let config = AdapterConfig::from_yaml_str("text_separator: \" | \"\n")?;
    let adapter = ToolAdapter::builder().config(config).build()?;
    let adapted = adapter.adapt(&tools)?;

    println!("Definitions sent to the provider:");
    for definition in adapted.definitions()? {
        println!("{}", serde_json::to_string_pretty(&definition)?);
    }

    let call = ToolCall {
        id: "call_0".into(),
        name: "mcp__weather__forecast".into(),
        arguments: json!({"city": "Oslo"}),
    };
    let result = adapted.execute(&call).await?;
    println!("\nTool result: {}", result.content);

    Ok(())
}
