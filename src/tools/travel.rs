use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;
use crate::error::Result;

/// Acknowledges a planning request. The itinerary itself is written by the model.
pub fn generate_travel_plan(location: &str, days: i64) -> String {
    format!("为{}生成了{}天的旅游规划", location, days)
}

#[derive(Debug, Deserialize)]
pub struct TravelPlanRequest {
    pub location: String,
    pub days: i64,
}

pub struct GenerateTravelPlan;

#[async_trait]
impl Tool for GenerateTravelPlan {
    fn name(&self) -> &str {
        "generate_travel_plan"
    }

    fn description(&self) -> &str {
        "根据用户提供的旅游地点和天数生成旅游规划，包括每天的行程安排"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "旅游目的地，如\"北京\"、\"上海\"、\"杭州\"等"
                },
                "days": {
                    "type": "integer",
                    "description": "旅游天数，如3、5、7等"
                }
            },
            "required": ["location", "days"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let req: TravelPlanRequest = serde_json::from_value(input)?;
        Ok(generate_travel_plan(&req.location, req.days))
    }
}

pub fn register(reg: &mut super::ToolRegistry) {
    reg.register(Box::new(GenerateTravelPlan));
}
