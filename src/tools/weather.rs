//! Mock weather lookup over a fixed table of cities, exposed to the agent
//! through [`WeatherServer`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Tool, ToolDefinition, ToolRegistry, ToolResult, ToolServer, ToolUse};
use crate::error::Result;

/// Date stamped on every payload unless the real date is requested.
pub const FIXED_DATE: &str = "2025-03-15";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherRecord {
    pub temperature: &'static str,
    pub condition: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
    pub air_quality: &'static str,
    pub suggestion: &'static str,
}

static WEATHER_TABLE: &[(&str, WeatherRecord)] = &[
    (
        "北京",
        WeatherRecord {
            temperature: "22°C",
            condition: "晴",
            humidity: "35%",
            wind: "北风3级",
            air_quality: "良",
            suggestion: "天气晴朗干燥，适合户外游览，注意补水防晒",
        },
    ),
    (
        "上海",
        WeatherRecord {
            temperature: "18°C",
            condition: "多云",
            humidity: "70%",
            wind: "东南风2级",
            air_quality: "优",
            suggestion: "温度适宜，早晚稍凉，建议携带薄外套",
        },
    ),
    (
        "广州",
        WeatherRecord {
            temperature: "27°C",
            condition: "阵雨",
            humidity: "85%",
            wind: "南风2级",
            air_quality: "良",
            suggestion: "午后可能有阵雨，出行请携带雨具",
        },
    ),
    (
        "深圳",
        WeatherRecord {
            temperature: "26°C",
            condition: "多云",
            humidity: "78%",
            wind: "东风3级",
            air_quality: "优",
            suggestion: "体感闷热，适合海边和室内景点",
        },
    ),
    (
        "杭州",
        WeatherRecord {
            temperature: "20°C",
            condition: "小雨",
            humidity: "80%",
            wind: "东北风2级",
            air_quality: "良",
            suggestion: "细雨中的西湖别有韵味，记得带伞并穿防滑鞋",
        },
    ),
    (
        "成都",
        WeatherRecord {
            temperature: "19°C",
            condition: "阴",
            humidity: "75%",
            wind: "微风",
            air_quality: "轻度污染",
            suggestion: "天气阴凉，适合品茶逛街，敏感人群减少户外停留",
        },
    ),
    (
        "西安",
        WeatherRecord {
            temperature: "16°C",
            condition: "晴",
            humidity: "40%",
            wind: "西北风3级",
            air_quality: "良",
            suggestion: "早晚温差较大，登城墙时注意添衣",
        },
    ),
    (
        "南京",
        WeatherRecord {
            temperature: "17°C",
            condition: "多云转晴",
            humidity: "60%",
            wind: "东风2级",
            air_quality: "良",
            suggestion: "气候宜人，适合游览中山陵和秦淮河",
        },
    ),
];

/// Exact, case-sensitive match.
pub fn lookup(city: &str) -> Option<&'static WeatherRecord> {
    WEATHER_TABLE
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, record)| record)
}

pub fn known_cities() -> impl Iterator<Item = &'static str> {
    WEATHER_TABLE.iter().map(|(name, _)| *name)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeatherQueryResult {
    Found {
        city: String,
        date: String,
        weather: WeatherRecord,
    },
    NotFound {
        error: String,
    },
}

pub fn query_weather(city: &str, date: &str) -> WeatherQueryResult {
    match lookup(city) {
        Some(record) => WeatherQueryResult::Found {
            city: city.to_string(),
            date: date.to_string(),
            weather: *record,
        },
        None => {
            let examples: Vec<&str> = known_cities().take(4).collect();
            WeatherQueryResult::NotFound {
                error: format!(
                    "未找到城市 '{}' 的天气信息，可查询的城市示例：{}",
                    city,
                    examples.join("、")
                ),
            }
        }
    }
}

/// Which date the weather payload carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeatherDate {
    #[default]
    Fixed,
    Today,
}

impl WeatherDate {
    pub fn resolve(&self) -> String {
        match self {
            WeatherDate::Fixed => FIXED_DATE.to_string(),
            WeatherDate::Today => chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Deserialize)]
struct WeatherInput {
    city: String,
}

pub struct GetWeather {
    date: WeatherDate,
}

impl GetWeather {
    pub fn new(date: WeatherDate) -> Self {
        Self { date }
    }
}

#[async_trait]
impl Tool for GetWeather {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "查询指定城市的当前天气信息，包括温度、天气状况、湿度、风力、空气质量和出行建议"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "城市名称，如\"北京\"、\"上海\""
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let p: WeatherInput = serde_json::from_value(input)?;
        let result = query_weather(&p.city, &self.date.resolve());
        if matches!(result, WeatherQueryResult::NotFound { .. }) {
            tracing::debug!(city = %p.city, "no weather data");
        }
        Ok(serde_json::to_string_pretty(&result)?)
    }
}

/// Tool-server bundling the weather lookup.
pub struct WeatherServer {
    tools: ToolRegistry,
}

impl WeatherServer {
    pub fn new(date: WeatherDate) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(Box::new(GetWeather::new(date)));
        Self { tools }
    }
}

#[async_trait]
impl ToolServer for WeatherServer {
    fn name(&self) -> &str {
        "weather"
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }

    async fn invoke(&self, tool_use: &ToolUse) -> Result<ToolResult> {
        self.tools.execute(tool_use).await
    }
}
