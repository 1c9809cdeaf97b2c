//! Daily words sensor (history, sentence, couplet, maxim)

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{update_time_text, Sensor, SensorContext, STATE_FETCH_FAILED, STATE_PENDING};
use crate::models::Category;

/// Sensor exposing the four daily-words categories
pub struct DailyWordsSensor {
    ctx: SensorContext,
    state: String,
    attributes: Value,
    available: bool,
}

impl DailyWordsSensor {
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
impl Sensor for DailyWordsSensor {
    fn name(&self) -> &'static str {
        "每日一言"
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
        let history = self.ctx.cached_fetch(Category::History).await;
        let sentence = self.ctx.cached_fetch(Category::Sentence).await;
        let couplet = self.ctx.cached_fetch(Category::Couplet).await;
        let maxim = self.ctx.cached_fetch(Category::Maxim).await;

        let (Some(history), Some(sentence), Some(couplet), Some(maxim)) =
            (history, sentence, couplet, maxim)
        else {
            self.available = false;
            self.state = STATE_FETCH_FAILED.to_string();
            tracing::error!("无法获取每日一言数据，请检查API密钥是否正确");
            return;
        };

        let update_time = update_time_text();
        self.attributes = json!({
            "title": "每日一言",
            "history": {
                "subtitle": "简说历史",
                "content": history.record.field_or("content", ""),
            },
            "sentence": {
                "subtitle": "古籍名句",
                "content": sentence.record.field_or("content", ""),
                "source": sentence.record.field_or("source", ""),
            },
            "couplet": {
                "subtitle": "经典对联",
                "content": couplet.record.field_or("content", ""),
            },
            "maxim": {
                "subtitle": "英文格言",
                "content": maxim.record.field_or("en", ""),
                "translate": maxim.record.field_or("zh", ""),
            },
            "update_time": update_time,
        });
        self.state = update_time;
        self.available = true;

        tracing::info!("每日一言更新成功");
    }
}
