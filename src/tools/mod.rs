use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub mod travel;
pub mod weather;

use crate::error::Result;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> Value;
    async fn execute(&self, input: Value) -> Result<String>;
}

/// A group of tools attached to an agent as one unit.
#[async_trait]
pub trait ToolServer: Send + Sync {
    fn name(&self) -> &str;
    fn list_tools(&self) -> Vec<ToolDefinition>;
    async fn invoke(&self, tool_use: &ToolUse) -> Result<ToolResult>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn from_tool(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn not_found(tool_use: &ToolUse) -> Self {
        Self {
            tool_use_id: tool_use.id.clone(),
            content: format!("Tool '{}' not found", tool_use.name),
            is_error: true,
        }
    }
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions in name order, so the advertised tool list is stable.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition::from_tool(tool.as_ref()))
            .collect()
    }

    pub async fn execute(&self, tool_use: &ToolUse) -> Result<ToolResult> {
        let Some(tool) = self.get(&tool_use.name) else {
            return Ok(ToolResult::not_found(tool_use));
        };

        match tool.execute(tool_use.input.clone()).await {
            Ok(content) => Ok(ToolResult {
                tool_use_id: tool_use.id.clone(),
                content,
                is_error: false,
            }),
            Err(e) => {
                tracing::warn!(tool = %tool_use.name, error = %e, "tool failed");
                Ok(ToolResult {
                    tool_use_id: tool_use.id.clone(),
                    content: format!("Error: {}", e),
                    is_error: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        let mut reg = ToolRegistry::new();
        travel::register(&mut reg);
        reg
    }

    #[test]
    fn definitions_carry_name_description_and_schema() {
        let defs = registry().definitions();
        assert_eq!(defs.len(), 1);
        let def = &defs[0];
        assert_eq!(def.name, "generate_travel_plan");
        assert!(!def.description.is_empty());
        assert_eq!(def.input_schema["required"], json!(["location", "days"]));
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_result() {
        let tool_use = ToolUse {
            id: "call_1".into(),
            name: "book_flight".into(),
            input: json!({}),
        };
        let result = registry().execute(&tool_use).await.unwrap();
        assert!(result.is_error);
        assert_eq!(result.tool_use_id, "call_1");
        assert!(result.content.contains("book_flight"));
    }

    #[tokio::test]
    async fn bad_arguments_become_error_result() {
        let tool_use = ToolUse {
            id: "call_2".into(),
            name: "generate_travel_plan".into(),
            input: json!({ "location": "杭州", "days": "three" }),
        };
        let result = registry().execute(&tool_use).await.unwrap();
        assert!(result.is_error);
        assert!(result.content.starts_with("Error:"));
    }
}
