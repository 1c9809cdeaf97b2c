//! Display-ready output of one slot resolution

use serde::Serialize;
use serde_json::{json, Value};

/// Horizontal alignment hint for the display card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
}

impl Alignment {
    /// String form used in sensor attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
        }
    }
}

/// Fully-resolved rendering bundle for the current slot
///
/// Constructed fresh on every resolution from cache contents plus the
/// matched slot; never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RenderingBundle {
    /// Display title with emoji marker
    pub title: String,

    /// Secondary line (source or author attribution), may be empty
    pub subtitle: String,

    /// Markup-friendly content (`<br>` line breaks)
    pub content_html: String,

    /// Plain-text content (newline breaks), with attribution folded in
    pub content_plain: String,

    /// Spoken announcement prefix, may be empty
    pub voice_title: String,

    /// Content alignment hint
    pub align: Alignment,

    /// Subtitle alignment hint
    pub subalign: Alignment,

    /// Label of the slot this bundle was resolved for
    pub slot_label: String,
}

impl RenderingBundle {
    /// Convert to a sensor attribute map
    pub fn to_attributes(&self, update_time: &str) -> Value {
        json!({
            "title": self.title,
            "subtitle": self.subtitle,
            "content1": self.content_html,
            "content2": self.content_plain,
            "voicetitle": self.voice_title,
            "align": self.align.as_str(),
            "subalign": self.subalign.as_str(),
            "time_slot": self.slot_label,
            "update_time": update_time,
        })
    }
}
