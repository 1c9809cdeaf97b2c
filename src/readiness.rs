//! Readiness gate for cache-only consumers
//!
//! The scrolling display never fetches; it depends on sibling sensors having
//! populated the shared cache. [`is_ready`] checks that every required
//! category is usable, and [`RetryGate`] turns consecutive failed checks into
//! a bounded waiting state followed by a terminal failure. The bound is
//! per-consumer: each gate owns its own counter.

use crate::cache::CacheSnapshot;
use crate::models::Category;

/// Default number of failed checks tolerated before terminal failure
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Check that every required category is present with a non-empty record
pub fn is_ready(snapshot: &CacheSnapshot, required: &[Category]) -> bool {
    required.iter().all(|c| snapshot.has_usable(*c))
}

/// Outcome of one gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// All required data present
    Ready,
    /// Data missing, within the retry bound (attempt, max)
    Waiting(u32, u32),
    /// Retry bound exceeded; consumer should mark itself unavailable
    Failed,
}

impl GateState {
    /// Sensor state string for degraded states
    pub fn state_text(&self) -> Option<String> {
        match self {
            Self::Ready => None,
            Self::Waiting(attempt, max) => Some(format!("等待数据({attempt}/{max})")),
            Self::Failed => Some(String::from("数据获取失败")),
        }
    }
}

/// Bounded retry counter for one consumer
#[derive(Debug, Clone)]
pub struct RetryGate {
    attempts: u32,
    max_attempts: u32,
}

impl RetryGate {
    /// Create a gate with the default bound
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_ATTEMPTS)
    }

    /// Create a gate with a custom bound
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
        }
    }

    /// Run one readiness check and advance the gate
    ///
    /// A passing check resets the counter. A failing check increments it and
    /// reports `Waiting` up to the bound, then `Failed` on every check after.
    pub fn check(&mut self, snapshot: &CacheSnapshot, required: &[Category]) -> GateState {
        if is_ready(snapshot, required) {
            self.attempts = 0;
            return GateState::Ready;
        }

        self.attempts += 1;
        if self.attempts <= self.max_attempts {
            GateState::Waiting(self.attempts, self.max_attempts)
        } else {
            GateState::Failed
        }
    }

    /// Failed checks since the last pass
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl Default for RetryGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use serde_json::json;

    fn record(content: &str) -> Record {
        serde_json::from_value(json!({ "content": content })).unwrap()
    }

    #[test]
    fn test_is_ready_all_present() {
        let snapshot = CacheSnapshot::from_records(vec![
            (Category::Morning, record("早")),
            (Category::Evening, record("晚")),
        ]);

        assert!(is_ready(&snapshot, &[Category::Morning, Category::Evening]));
    }

    #[test]
    fn test_is_ready_missing_key() {
        let snapshot = CacheSnapshot::from_records(vec![(Category::Morning, record("早"))]);

        assert!(!is_ready(&snapshot, &[Category::Morning, Category::Evening]));
    }

    #[test]
    fn test_is_ready_empty_record() {
        let snapshot = CacheSnapshot::from_records(vec![(Category::Morning, Record::default())]);

        assert!(!is_ready(&snapshot, &[Category::Morning]));
    }

    #[test]
    fn test_gate_fails_terminally_on_fourth_check() {
        let mut gate = RetryGate::new();
        let empty = CacheSnapshot::default();
        let required = [Category::Morning];

        assert_eq!(gate.check(&empty, &required), GateState::Waiting(1, 3));
        assert_eq!(gate.check(&empty, &required), GateState::Waiting(2, 3));
        assert_eq!(gate.check(&empty, &required), GateState::Waiting(3, 3));
        assert_eq!(gate.check(&empty, &required), GateState::Failed);
        // Remains failed until data appears
        assert_eq!(gate.check(&empty, &required), GateState::Failed);
    }

    #[test]
    fn test_gate_resets_on_success() {
        let mut gate = RetryGate::new();
        let empty = CacheSnapshot::default();
        let required = [Category::Morning];

        gate.check(&empty, &required);
        gate.check(&empty, &required);
        assert_eq!(gate.attempts(), 2);

        let ready = CacheSnapshot::from_records(vec![(Category::Morning, record("早"))]);
        assert_eq!(gate.check(&ready, &required), GateState::Ready);
        assert_eq!(gate.attempts(), 0);

        // Counter starts over after a pass
        assert_eq!(gate.check(&empty, &required), GateState::Waiting(1, 3));
    }

    #[test]
    fn test_state_text() {
        assert_eq!(GateState::Ready.state_text(), None);
        assert_eq!(
            GateState::Waiting(2, 3).state_text(),
            Some(String::from("等待数据(2/3)"))
        );
        assert_eq!(
            GateState::Failed.state_text(),
            Some(String::from("数据获取失败"))
        );
    }
}
