//! Interactive front end: collects settings and the trip, runs the planner,
//! prints the plan.

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::agent::{Agent, AgentSpec};
use crate::config::Config;
use crate::error::{AgentError, Result};
use crate::openai::ChatBackend;

pub fn build_query(location: &str, days: i64) -> String {
    format!(
        "请为我计划一次{}天的{}之旅，并且告诉我当地的天气情况",
        days, location
    )
}

/// Trip length must be a positive whole number.
pub fn parse_days(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(days) if days > 0 => Ok(days),
        Ok(_) => Err(AgentError::InvalidInput("旅游天数必须大于0。".to_string())),
        Err(_) => Err(AgentError::InvalidInput("旅游天数必须是数字。".to_string())),
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Runs one planning session.
///
/// `connect` is only called once the settings and the trip have been
/// validated, so bad input never reaches the model.
pub async fn run<R, W, E, C>(input: &mut R, output: &mut W, env: E, connect: C) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Fn(&str) -> Option<String>,
    C: FnOnce(&Config) -> Arc<dyn ChatBackend>,
{
    writeln!(output, "欢迎使用旅游规划助手!")?;
    writeln!(output, "请输入兼容OpenAI API的服务配置信息")?;

    let base_url = prompt(input, output, "API 基础URL (如 http://localhost:8000/v1): ")?;
    let api_key = prompt(input, output, "API Key: ")?;
    let config = Config::resolve(&base_url, &api_key, env)?;

    writeln!(output, "\n请输入您想要旅游的地点和天数")?;
    let location = prompt(input, output, "旅游地点: ")?;
    if location.is_empty() {
        return Err(AgentError::InvalidInput("旅游地点不能为空。".to_string()));
    }
    let days = parse_days(&prompt(input, output, "旅游天数: ")?)?;

    let spec = if config.weather_server {
        AgentSpec::travel_agent_with_weather(config.model.clone(), config.weather_date)
    } else {
        AgentSpec::travel_agent(config.model.clone())
    };
    let agent = Agent::new(connect(&config), spec, config.max_turns);

    writeln!(output, "\n正在生成旅游规划，请稍候...\n")?;
    let plan = agent.run(&build_query(&location, days)).await?;

    writeln!(output, "\n=== 您的旅游规划 ===\n")?;
    writeln!(output, "{}", plan)?;
    Ok(())
}
