//! Runtime configuration.
//!
//! Endpoint and key come from the interactive prompt, falling back to the
//! environment when the answer is blank:
//! - `OPENAI_BASE_URL` - OpenAI-compatible endpoint, e.g. `http://localhost:8000/v1`.
//! - `OPENAI_API_KEY` - API key for that endpoint.
//!
//! Everything else is environment-only:
//! - `OPENAI_MODEL` - Model id. Defaults to [`DEFAULT_MODEL`].
//! - `TRAVEL_MAX_TURNS` - Model round-trips allowed per run. Defaults to `10`.
//! - `TRAVEL_WEATHER_DATE` - `fixed` (default) or `today`.
//! - `TRAVEL_WEATHER_SERVER` - `on` (default) attaches the weather tool-server, `off` leaves it out.

use crate::error::{AgentError, Result};
use crate::tools::weather::WeatherDate;

pub const DEFAULT_MODEL: &str = "ep-20250213111445-6677q";
pub const DEFAULT_MAX_TURNS: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_turns: usize,
    pub weather_date: WeatherDate,
    pub weather_server: bool,
}

impl Config {
    /// Builds the configuration from prompt answers, using `env` for anything
    /// left blank.
    pub fn resolve<F>(base_url: &str, api_key: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = or_env(base_url, "OPENAI_BASE_URL", &env);
        let api_key = or_env(api_key, "OPENAI_API_KEY", &env);

        let (Some(base_url), Some(api_key)) = (base_url, api_key) else {
            return Err(AgentError::MissingConfig(
                "API基础URL和密钥不能为空。请设置OPENAI_BASE_URL和OPENAI_API_KEY环境变量或在提示时输入。"
                    .to_string(),
            ));
        };

        let model = non_empty(env("OPENAI_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_turns = match non_empty(env("TRAVEL_MAX_TURNS")) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AgentError::InvalidInput(format!(
                        "TRAVEL_MAX_TURNS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_MAX_TURNS,
        };

        let weather_date = match non_empty(env("TRAVEL_WEATHER_DATE")).as_deref() {
            None | Some("fixed") => WeatherDate::Fixed,
            Some("today") => WeatherDate::Today,
            Some(other) => {
                return Err(AgentError::InvalidInput(format!(
                    "TRAVEL_WEATHER_DATE must be 'fixed' or 'today', got '{}'",
                    other
                )))
            }
        };

        let weather_server = !matches!(
            non_empty(env("TRAVEL_WEATHER_SERVER")).as_deref(),
            Some("off" | "0" | "false")
        );

        Ok(Self {
            base_url,
            api_key,
            model,
            max_turns,
            weather_date,
            weather_server,
        })
    }
}

/// Process environment lookup.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn or_env<F>(input: &str, key: &str, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(Some(input.trim().to_string())).or_else(|| non_empty(env(key)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
