//! Time-slot content scheduler
//!
//! Maps the current minute-of-day onto the fixed slot partition and renders
//! the matched slot's category from a cache snapshot into one
//! [`RenderingBundle`]. Resolution performs no I/O and holds no hidden
//! state: it is a pure function of `(minute, snapshot)`, which is what makes
//! the display logic testable without touching the clock or the network.

pub mod bundle;
pub mod slots;

pub use bundle::{Alignment, RenderingBundle};
pub use slots::{DisplaySchedule, TimeSlot, MINUTES_PER_DAY};

use chrono::{DateTime, Local, Timelike};

use crate::cache::CacheSnapshot;
use crate::format::{normalize_evening, normalize_morning, to_markup, to_plain};
use crate::models::{Category, Record};

/// Convert a local timestamp to minutes since midnight
pub fn minute_of_day(now: DateTime<Local>) -> u16 {
    (now.hour() * 60 + now.minute()) as u16
}

/// Resolve the current slot against the default schedule
pub fn resolve(now_minute: u16, snapshot: &CacheSnapshot) -> RenderingBundle {
    DisplaySchedule::new().resolve(now_minute, snapshot)
}

impl DisplaySchedule {
    /// Resolve a minute-of-day to the bundle for its slot
    pub fn resolve(&self, now_minute: u16, snapshot: &CacheSnapshot) -> RenderingBundle {
        let slot = self.slot_for(now_minute);
        let record = snapshot
            .record(slot.category)
            .cloned()
            .unwrap_or_default();

        let mut bundle = render_category(slot.category, &record);
        bundle.slot_label = slot.label.to_string();
        bundle
    }
}

/// Render one category's record into its display form
///
/// Field fallbacks and presentation shapes follow the provider's per-category
/// conventions; the slot label is filled in by the caller.
fn render_category(category: Category, record: &Record) -> RenderingBundle {
    match category {
        Category::Morning => {
            let content = normalize_morning(record.field("content").unwrap_or(""));
            RenderingBundle {
                title: "🌅早安问候".into(),
                subtitle: String::new(),
                content_html: content.clone(),
                content_plain: content,
                voice_title: String::new(),
                align: Alignment::Left,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::Evening => {
            let content = normalize_evening(record.field("content").unwrap_or(""));
            RenderingBundle {
                title: "🌃晚安问候".into(),
                subtitle: String::new(),
                content_html: content.clone(),
                content_plain: content,
                voice_title: String::new(),
                align: Alignment::Left,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::Maxim => {
            let en = record.field_or("en", "No maxim available");
            let zh = record.field_or("zh", "暂无格言");
            RenderingBundle {
                title: "☘️英文格言".into(),
                subtitle: String::new(),
                content_html: format!("【英文】{en}<br>【中文】{zh}"),
                content_plain: format!("【英文】{en}\n【中文】{zh}"),
                voice_title: "每日英文格言————".into(),
                align: Alignment::Left,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::Joke => {
            let title = record.field_or("title", "今日笑话");
            let content = record.field_or("content", "暂无笑话内容");
            RenderingBundle {
                title: "🌻每日笑话".into(),
                subtitle: title.clone(),
                content_html: content.clone(),
                content_plain: format!("{title}\n{content}"),
                voice_title: "今日笑语————".into(),
                align: Alignment::Left,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::Sentence => {
            let source = record.field_or("source", "古籍");
            let content = record.field_or("content", "暂无名句内容");
            RenderingBundle {
                title: "🌻古籍名句".into(),
                subtitle: format!("《{source}》"),
                content_html: to_markup(&content),
                content_plain: format!("《{source}》\n{}", to_plain(&content)),
                voice_title: "今日古籍名句————".into(),
                align: Alignment::Center,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::Couplet => {
            let content = record.field_or("content", "暂无对联内容");
            RenderingBundle {
                title: "🔖经典对联".into(),
                subtitle: String::new(),
                content_html: content.clone(),
                content_plain: content,
                voice_title: "今日经典对联————".into(),
                align: Alignment::Center,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::History => {
            let content = record.field_or("content", "暂无历史内容");
            RenderingBundle {
                title: "🏷️简说历史".into(),
                subtitle: String::new(),
                content_html: content.clone(),
                content_plain: content,
                voice_title: "今日简说历史————".into(),
                align: Alignment::Left,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::PoetryTang => {
            let author = record.field_or("author", "未知作者");
            let title = record.field_or("title", "无题");
            let content = record.field_or("content", "暂无唐诗内容");
            let subtitle = format!("{author} · 《{title}》");
            RenderingBundle {
                title: "🔖唐诗鉴赏".into(),
                content_html: to_markup(&content),
                content_plain: format!("{subtitle}\n{}", to_plain(&content)),
                subtitle,
                voice_title: "每日唐诗鉴赏————".into(),
                align: Alignment::Center,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::PoetrySong => {
            let source = record.field_or("source", "宋词");
            let content = record.field_or("content", "暂无宋词内容");
            RenderingBundle {
                title: "🌼最美宋词".into(),
                subtitle: source.clone(),
                content_html: to_markup(&content),
                content_plain: format!("{source}\n{}", to_plain(&content)),
                voice_title: "今日最美宋词————".into(),
                align: Alignment::Center,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::PoetryYuan => {
            let author = record.field_or("author", "未知作者");
            let title = record.field_or("title", "无题");
            let content = record.field_or("content", "暂无元曲内容");
            let subtitle = format!("{author} · 《{title}》");
            RenderingBundle {
                title: "🔖精选元曲".into(),
                content_html: to_markup(&content),
                content_plain: format!("{subtitle}\n{}", to_plain(&content)),
                subtitle,
                voice_title: "今日精选元曲————".into(),
                align: Alignment::Center,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
        Category::Riddle => {
            let riddle = record.field_or("riddle", "暂无谜语");
            let kind = record.field_or("type", "未知类型");
            let answer = record.field_or("answer", "暂无答案");
            let description = record.field_or("description", "暂无解释");
            let disturb = record.field_or("disturb", "暂无相似谜语");
            RenderingBundle {
                title: "🏷️每日谜语".into(),
                subtitle: String::new(),
                content_html: format!(
                    "【谜面】<br>{riddle}（{kind}）<br>【谜底】<br>{answer}<br>【解释】<br>{description}<br>【相似】<br>{disturb}"
                ),
                content_plain: format!("【谜面】\n{riddle}（{kind}）\n【谜底】\n{answer}"),
                voice_title: "今日谜语————".into(),
                align: Alignment::Left,
                subalign: Alignment::Center,
                slot_label: String::new(),
            }
        }
    }
}
