//! Classic poetry sensor (Tang, Song, Yuan)

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{update_time_text, Sensor, SensorContext, STATE_FETCH_FAILED, STATE_PENDING};
use crate::models::Category;

/// Sensor exposing the three classic poetry categories
pub struct PoetrySensor {
    ctx: SensorContext,
    state: String,
    attributes: Value,
    available: bool,
}

impl PoetrySensor {
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
impl Sensor for PoetrySensor {
    fn name(&self) -> &'static str {
        "古诗宋词"
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
        let tang = self.ctx.cached_fetch(Category::PoetryTang).await;
        let song = self.ctx.cached_fetch(Category::PoetrySong).await;
        let yuan = self.ctx.cached_fetch(Category::PoetryYuan).await;

        let (Some(tang), Some(song), Some(yuan)) = (tang, song, yuan) else {
            self.available = false;
            self.state = STATE_FETCH_FAILED.to_string();
            tracing::error!("无法获取古诗宋词数据，请检查API密钥是否正确");
            return;
        };

        let update_time = update_time_text();
        self.attributes = json!({
            "title": "古诗宋词",
            "code": song.code,
            "tangshi": {
                "subtitle": "唐诗鉴赏",
                "content": tang.record.field_or("content", ""),
                "source": tang.record.field_or("title", ""),
                "author": tang.record.field_or("author", ""),
                "intro": tang.record.field_or("intro", ""),
                "kind": tang.record.field_or("kind", ""),
            },
            "songci": {
                "subtitle": "最美宋词",
                "content": song.record.field_or("content", ""),
                "source": song.record.field_or("source", ""),
                "author": song.record.field_or("author", ""),
            },
            "yuanqu": {
                "subtitle": "精选元曲",
                "content": yuan.record.field_or("content", ""),
                "source": yuan.record.field_or("title", ""),
                "author": yuan.record.field_or("author", ""),
                "note": yuan.record.field_or("note", ""),
                "translation": yuan.record.field_or("translation", ""),
            },
            "update_time": update_time,
        });
        self.state = update_time;
        self.available = true;

        tracing::info!("古诗宋词更新成功");
    }
}
