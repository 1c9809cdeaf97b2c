//! Scrolling display sensor
//!
//! The scheduler composite: reads only the shared cache snapshot (it never
//! fetches), waits behind the readiness gate until sibling sensors have
//! populated every category the slot partition displays, then resolves the
//! current minute-of-day to one rendering bundle.

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;
use std::sync::Arc;

use super::{update_time_text, Sensor, STATE_PENDING};
use crate::cache::ContentCache;
use crate::models::Category;
use crate::readiness::{GateState, RetryGate};
use crate::scheduler::{minute_of_day, DisplaySchedule};

/// Sensor exposing the time-slot scrolling display
pub struct ScrollingSensor {
    cache: Arc<ContentCache>,
    schedule: DisplaySchedule,
    required: Vec<Category>,
    gate: RetryGate,
    state: String,
    attributes: Value,
    available: bool,
}

impl ScrollingSensor {
    /// Create the sensor with the default slot schedule
    pub fn new(cache: Arc<ContentCache>) -> Self {
        Self::with_schedule(cache, DisplaySchedule::new())
    }

    /// Create the sensor with an explicit slot schedule
    pub fn with_schedule(cache: Arc<ContentCache>, schedule: DisplaySchedule) -> Self {
        let required = schedule.categories();
        Self {
            cache,
            schedule,
            required,
            gate: RetryGate::new(),
            state: STATE_PENDING.to_string(),
            attributes: Value::Null,
            available: true,
        }
    }

    /// Run one update cycle at an explicit minute-of-day
    ///
    /// `update()` calls this with the wall clock; tests call it directly so
    /// slot resolution is not wall-clock-flaky.
    pub async fn update_at(&mut self, now_minute: u16) {
        let snapshot = self.cache.snapshot().await;

        match self.gate.check(&snapshot, &self.required) {
            GateState::Ready => {}
            state @ GateState::Waiting(attempt, max) => {
                tracing::warn!(
                    attempt = %attempt,
                    max = %max,
                    "滚动内容：等待其他传感器数据更新"
                );
                self.state = state.state_text().unwrap_or_default();
                return;
            }
            state @ GateState::Failed => {
                tracing::error!("滚动内容：无法获取数据，已达到最大重试次数");
                self.state = state.state_text().unwrap_or_default();
                self.available = false;
                return;
            }
        }

        let bundle = self.schedule.resolve(now_minute, &snapshot);
        tracing::info!(time_slot = %bundle.slot_label, "滚动内容更新成功");

        self.attributes = bundle.to_attributes(&update_time_text());
        self.state = bundle.title;
        self.available = true;
    }
}

#[async_trait]
impl Sensor for ScrollingSensor {
    fn name(&self) -> &'static str {
        "滚动内容"
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
        self.update_at(minute_of_day(Local::now())).await;
    }
}
