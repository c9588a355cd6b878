use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::openai::{ChatBackend, ChatMessage, ChatRequest, Tool, ToolCall};
use crate::tools::weather::{WeatherDate, WeatherServer};
use crate::tools::{ToolDefinition, ToolRegistry, ToolResult, ToolServer, ToolUse};

const PLANNER_NAME: &str = "旅游规划助手";

const PLANNER_INSTRUCTIONS: &str = "你是一个专业的旅游规划助手。你的任务是根据用户提供的旅游地点和天数，\
制定一个详细的旅游规划。规划应包括：\n\
1. 每天的行程安排，包括景点、餐厅和活动\n\
2. 每个景点的参观时间和简短介绍\n\
3. 餐饮推荐，包括当地特色美食\n\
4. 交通建议\n\
5. 额外的旅游贴士（如天气、穿着、文化禁忌等）\n\n\
使用generate_travel_plan工具来生成旅游规划。";

const WEATHER_INSTRUCTIONS: &str =
    "\n使用get_weather工具查询目的地的天气情况，并根据天气调整行程和穿着建议。";

/// Declarative description of an agent: who it is, what it may call.
pub struct AgentSpec {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub tools: ToolRegistry,
    pub servers: Vec<Box<dyn ToolServer>>,
}

impl AgentSpec {
    /// Planner with the travel-plan tool only.
    pub fn travel_agent(model: impl Into<String>) -> Self {
        let mut tools = ToolRegistry::new();
        crate::tools::travel::register(&mut tools);

        Self {
            name: PLANNER_NAME.to_string(),
            instructions: PLANNER_INSTRUCTIONS.to_string(),
            model: model.into(),
            tools,
            servers: Vec::new(),
        }
    }

    /// Planner with the weather tool-server attached.
    pub fn travel_agent_with_weather(model: impl Into<String>, date: WeatherDate) -> Self {
        let mut spec = Self::travel_agent(model);
        spec.instructions.push_str(WEATHER_INSTRUCTIONS);
        spec.servers.push(Box::new(WeatherServer::new(date)));
        spec
    }

    /// Every tool the model may call, local tools first.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs = self.tools.definitions();
        for server in &self.servers {
            defs.extend(server.list_tools());
        }
        defs
    }

    async fn dispatch(&self, tool_use: &ToolUse) -> Result<ToolResult> {
        if self.tools.contains(&tool_use.name) {
            return self.tools.execute(tool_use).await;
        }
        for server in &self.servers {
            if server.list_tools().iter().any(|def| def.name == tool_use.name) {
                tracing::debug!(server = server.name(), tool = %tool_use.name, "routing to server");
                return server.invoke(tool_use).await;
            }
        }
        Ok(ToolResult::not_found(tool_use))
    }
}

pub struct Agent {
    backend: Arc<dyn ChatBackend>,
    spec: AgentSpec,
    max_turns: usize,
}

impl Agent {
    pub fn new(backend: Arc<dyn ChatBackend>, spec: AgentSpec, max_turns: usize) -> Self {
        Self {
            backend,
            spec,
            max_turns,
        }
    }

    /// Runs the query to completion and returns the model's final answer.
    pub async fn run(&self, query: &str) -> Result<String> {
        let mut conversation = vec![
            ChatMessage::system(self.spec.instructions.clone()),
            ChatMessage::user(query),
        ];

        let tools: Vec<Tool> = self
            .spec
            .definitions()
            .into_iter()
            .map(Tool::from)
            .collect();

        tracing::info!(agent = %self.spec.name, model = %self.spec.model, tools = tools.len(), "starting run");

        for turn in 0..self.max_turns {
            tracing::debug!(turn = turn + 1, "model turn");

            let request = ChatRequest {
                model: self.spec.model.clone(),
                messages: conversation.clone(),
                tools: (!tools.is_empty()).then(|| tools.clone()),
                tool_choice: (!tools.is_empty()).then(|| "auto".to_string()),
            };

            let message = self.backend.chat(request).await?.into_message()?;

            let tool_calls = message.tool_calls.clone().unwrap_or_default();
            if tool_calls.is_empty() {
                return match message.content {
                    Some(text) if !text.trim().is_empty() => Ok(text),
                    _ => Err(AgentError::ApiError("model returned an empty response".to_string())),
                };
            }

            conversation.push(message);

            for call in &tool_calls {
                let result = self.execute_tool_call(call).await?;
                if result.is_error {
                    tracing::warn!(tool = %call.function.name, "tool call failed: {}", result.content);
                }
                conversation.push(ChatMessage::tool_result(result.tool_use_id, result.content));
            }
        }

        Err(AgentError::ApiError(format!(
            "no final answer after {} turns",
            self.max_turns
        )))
    }

    async fn execute_tool_call(&self, call: &ToolCall) -> Result<ToolResult> {
        tracing::info!(tool = %call.function.name, args = %call.function.arguments, "tool call");

        let input = match serde_json::from_str(&call.function.arguments) {
            Ok(input) => input,
            Err(e) => {
                return Ok(ToolResult {
                    tool_use_id: call.id.clone(),
                    content: format!("Error: invalid arguments: {}", e),
                    is_error: true,
                })
            }
        };

        let tool_use = ToolUse {
            id: call.id.clone(),
            name: call.function.name.clone(),
            input,
        };
        self.spec.dispatch(&tool_use).await
    }
}
