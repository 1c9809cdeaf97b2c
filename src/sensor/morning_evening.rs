//! Morning/evening greeting sensor

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{update_time_text, Sensor, SensorContext, STATE_FETCH_FAILED, STATE_PENDING};
use crate::format::{normalize_evening, normalize_morning};
use crate::models::Category;

/// Sensor exposing the morning and evening greeting pair
pub struct MorningEveningSensor {
    ctx: SensorContext,
    state: String,
    attributes: Value,
    available: bool,
}

impl MorningEveningSensor {
    /// Create the sensor in its pending state
    pub fn new(ctx: SensorContext) -> Self {
        Self {
            ctx,
            state: STATE_PENDING.to_string(),
            attributes: Value::Null,
            available: true,
        }
    }
}

#[async_trait]
impl Sensor for MorningEveningSensor {
    fn name(&self) -> &'static str {
        "早安晚安"
    }

    fn state(&self) -> &str {
        &self.state
    }

    fn attributes(&self) -> Value {
        self.attributes.clone()
    }

    fn available(&self) -> bool {
        self.available
    }

    async fn update(&mut self) {
        let morning = self.ctx.cached_fetch(Category::Morning).await;
        let evening = self.ctx.cached_fetch(Category::Evening).await;

        let (Some(morning), Some(evening)) = (morning, evening) else {
            self.available = false;
            self.state = STATE_FETCH_FAILED.to_string();
            tracing::error!("无法获取早安晚安数据，请检查API密钥是否正确");
            return;
        };

        let morning_content = normalize_morning(morning.record.field("content").unwrap_or(""));
        let evening_content = normalize_evening(evening.record.field("content").unwrap_or(""));

        let update_time = update_time_text();
        self.attributes = json!({
            "title": "早安晚安",
            "code": evening.code,
            "mtitle": "早安心语",
            "morning": morning_content,
            "etitle": "晚安心语",
            "evening": evening_content,
            "update_time": update_time,
        });
        self.state = update_time;
        self.available = true;

        tracing::info!("早安晚安更新成功");
    }
}
