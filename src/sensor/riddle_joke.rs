//! Riddle and joke sensor

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{update_time_text, Sensor, SensorContext, STATE_FETCH_FAILED, STATE_PENDING};
use crate::models::Category;

/// Sensor exposing the daily riddle and joke pair
pub struct RiddleJokeSensor {
    ctx: SensorContext,
    state: String,
    attributes: Value,
    available: bool,
}

impl RiddleJokeSensor {
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
impl Sensor for RiddleJokeSensor {
    fn name(&self) -> &'static str {
        "谜语笑话"
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
        let riddle = self.ctx.cached_fetch(Category::Riddle).await;
        let joke = self.ctx.cached_fetch(Category::Joke).await;

        let (Some(riddle), Some(joke)) = (riddle, joke) else {
            self.available = false;
            self.state = STATE_FETCH_FAILED.to_string();
            tracing::error!("无法获取谜语笑话数据，请检查API密钥是否正确");
            return;
        };

        let update_time = update_time_text();
        self.attributes = json!({
            "title": "谜语笑话",
            "code": joke.code,
            "riddle": {
                "subtitle": "每日谜语",
                "content": riddle.record.field_or("riddle", ""),
                "type": riddle.record.field_or("type", ""),
                "answer": riddle.record.field_or("answer", ""),
                "description": riddle.record.field_or("description", ""),
                "disturb": riddle.record.field_or("disturb", ""),
            },
            "joke": {
                "subtitle": "每日笑话",
                "name": joke.record.field_or("title", ""),
                "content": joke.record.field_or("content", ""),
            },
            "update_time": update_time,
        });
        self.state = update_time;
        self.available = true;

        tracing::info!("谜语笑话更新成功");
    }
}
