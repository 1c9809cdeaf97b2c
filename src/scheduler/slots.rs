//! Fixed minute-of-day partition for the scrolling display
//!
//! The day is divided into ordered half-open `[start, end)` intervals, each
//! mapped to one content category. The default schedule covers the full
//! `[0, 1440)` range with no gaps and no overlaps; the evening span wraps
//! midnight and is represented as two entries sharing a label.

use serde::Serialize;

use crate::models::Category;

/// Minutes in a day
pub const MINUTES_PER_DAY: u16 = 1440;

/// One display interval mapped to a category
#[derive(Debug, Clone, Serialize)]
pub struct TimeSlot {
    /// Inclusive start, minutes since midnight
    pub start_minute: u16,

    /// Exclusive end, minutes since midnight
    pub end_minute: u16,

    /// Category shown during this interval
    pub category: Category,

    /// Chinese label for the interval
    pub label: &'static str,
}

impl TimeSlot {
    /// Check interval containment (inclusive start, exclusive end)
    pub fn contains(&self, minute: u16) -> bool {
        self.start_minute <= minute && minute < self.end_minute
    }

    /// Format as display string, e.g. `05:30-08:30 早安时段 (morning)`
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}-{:02}:{:02} {} ({})",
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60,
            self.label,
            self.category,
        )
    }
}

/// Ordered slot partition of the 24-hour clock
#[derive(Debug, Clone)]
pub struct DisplaySchedule {
    slots: Vec<TimeSlot>,
}

impl DisplaySchedule {
    /// Build the default schedule
    pub fn new() -> Self {
        let slot = |start: u16, end: u16, category: Category, label: &'static str| TimeSlot {
            start_minute: start,
            end_minute: end,
            category,
            label,
        };

        Self {
            slots: vec![
                slot(0, 5 * 60 + 30, Category::Evening, "晚安时段"),
                slot(5 * 60 + 30, 8 * 60 + 30, Category::Morning, "早安时段"),
                slot(8 * 60 + 30, 11 * 60, Category::Maxim, "格言时段"),
                slot(11 * 60, 13 * 60, Category::Sentence, "名句时段"),
                slot(13 * 60, 14 * 60, Category::Couplet, "对联时段"),
                slot(14 * 60, 15 * 60, Category::History, "历史时段"),
                slot(15 * 60, 17 * 60, Category::PoetryTang, "唐诗时段"),
                slot(17 * 60, 18 * 60 + 30, Category::PoetrySong, "宋词时段"),
                slot(18 * 60 + 30, 21 * 60, Category::PoetryYuan, "元曲时段"),
                slot(21 * 60, MINUTES_PER_DAY, Category::Evening, "晚安时段"),
            ],
        }
    }

    /// Create from explicit slots
    ///
    /// The slots must form a total partition of `[0, 1440)`; this is checked
    /// and rejected rather than silently producing gaps.
    pub fn from_slots(slots: Vec<TimeSlot>) -> Option<Self> {
        let schedule = Self { slots };
        schedule.is_total_partition().then_some(schedule)
    }

    /// Find the slot containing a minute-of-day
    ///
    /// Exactly one slot matches for any minute in `[0, 1440)`; this is
    /// guaranteed by the partition invariant checked at construction.
    pub fn slot_for(&self, minute: u16) -> &TimeSlot {
        self.slots
            .iter()
            .find(|s| s.contains(minute))
            .unwrap_or(&self.slots[0])
    }

    /// All slots in order
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Distinct categories the schedule displays
    ///
    /// These are the categories the readiness gate requires before the
    /// scrolling sensor renders anything.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for slot in &self.slots {
            if !seen.contains(&slot.category) {
                seen.push(slot.category);
            }
        }
        seen
    }

    /// Verify the slots are ordered, contiguous and cover the whole day
    pub fn is_total_partition(&self) -> bool {
        let mut expected = 0u16;
        for slot in &self.slots {
            if slot.start_minute != expected || slot.end_minute <= slot.start_minute {
                return false;
            }
            expected = slot.end_minute;
        }
        expected == MINUTES_PER_DAY
    }
}

impl Default for DisplaySchedule {
    fn default() -> Self {
        Self::new()
    }
}
