//! Line-break formatting for flowing Chinese prose
//!
//! Content fields arrive as a single run of text. For card/markup display a
//! `<br>` is inserted after every sentence-terminal mark, and for plain-text
//! display (TTS, notifications) a literal newline. Both variants collapse
//! doubled breaks and never end with a break, which makes them idempotent
//! under re-application.

/// Markup break token
pub const MARKUP_BREAK: &str = "<br>";

/// Sentence-terminal punctuation (CJK full-width forms)
const SENTENCE_ENDINGS: [char; 3] = ['。', '？', '！'];

/// Insert markup line breaks after sentence-terminal punctuation
///
/// # Examples
///
/// ```
/// use tianxing::format::to_markup;
///
/// assert_eq!(to_markup("甲。乙？丙！"), "甲。<br>乙？<br>丙！");
/// ```
pub fn to_markup(text: &str) -> String {
    apply_breaks(text, MARKUP_BREAK)
}

/// Insert plain newlines after sentence-terminal punctuation
///
/// # Examples
///
/// ```
/// use tianxing::format::to_plain;
///
/// assert_eq!(to_plain("甲。乙？丙！"), "甲。\n乙？\n丙！");
/// ```
pub fn to_plain(text: &str) -> String {
    apply_breaks(text, "\n")
}

/// Markup variant over an optional field; absent maps to empty
pub fn to_markup_opt(text: Option<&str>) -> String {
    text.map(to_markup).unwrap_or_default()
}

/// Plain variant over an optional field; absent maps to empty
pub fn to_plain_opt(text: Option<&str>) -> String {
    text.map(to_plain).unwrap_or_default()
}

/// Default morning greeting when the provider returns nothing
pub const MORNING_FALLBACK: &str = "早安！新的一天开始了！";

/// Default evening greeting when the provider returns nothing
pub const EVENING_FALLBACK: &str = "晚安！好梦！";

/// Prefix a morning greeting marker unless one is already present
///
/// Presentation normalization, not a correctness check: the marker is added
/// only when `早安` appears nowhere in the text.
pub fn normalize_morning(text: &str) -> String {
    if text.is_empty() {
        MORNING_FALLBACK.to_string()
    } else if text.contains("早安") {
        text.to_string()
    } else {
        format!("早安！{text}")
    }
}

/// Suffix an evening greeting marker unless one is already present
pub fn normalize_evening(text: &str) -> String {
    if text.is_empty() {
        EVENING_FALLBACK.to_string()
    } else if text.contains("晚安") {
        text.to_string()
    } else {
        format!("{text}晚安！")
    }
}

fn apply_breaks(text: &str, token: &str) -> String {
    let mut out = String::with_capacity(text.len() + token.len() * 4);
    for ch in text.chars() {
        out.push(ch);
        if SENTENCE_ENDINGS.contains(&ch) {
            out.push_str(token);
        }
    }

    // Collapse doubled tokens (input may already carry breaks after marks)
    let doubled = format!("{token}{token}");
    while out.contains(&doubled) {
        out = out.replace(&doubled, token);
    }

    // No trailing break
    while out.ends_with(token) {
        out.truncate(out.len() - token.len());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_breaks_inserted_after_each_mark() {
        assert_eq!(to_markup("甲。乙？丙！"), "甲。<br>乙？<br>丙！");
        assert_eq!(to_plain("甲。乙？丙！"), "甲。\n乙？\n丙！");
    }

    #[test]
    fn test_no_trailing_break() {
        assert_eq!(to_markup("春眠不觉晓。"), "春眠不觉晓。");
        assert_eq!(to_plain("春眠不觉晓。"), "春眠不觉晓。");
    }

    #[test]
    fn test_empty_and_absent_input() {
        assert_eq!(to_markup(""), "");
        assert_eq!(to_plain(""), "");
        assert_eq!(to_markup_opt(None), "");
        assert_eq!(to_plain_opt(Some("甲。乙")), "甲。\n乙");
    }

    #[test]
    fn test_text_without_punctuation_unchanged() {
        assert_eq!(to_markup("床前明月光"), "床前明月光");
        assert_eq!(to_plain("hello world"), "hello world");
    }

    #[test]
    fn test_already_formatted_input() {
        let formatted = "甲。<br>乙？<br>丙";
        assert_eq!(to_markup(formatted), formatted);

        let plain = "甲。\n乙？\n丙";
        assert_eq!(to_plain(plain), plain);
    }

    #[test]
    fn test_consecutive_marks() {
        // Each mark gets its own break, doubles collapse
        assert_eq!(to_markup("真的吗？！好"), "真的吗？<br>！<br>好");
    }

    #[test]
    fn test_normalize_morning() {
        assert_eq!(normalize_morning("新的一天"), "早安！新的一天");
        assert_eq!(normalize_morning("早安，朋友"), "早安，朋友");
        assert_eq!(normalize_morning("祝你早安快乐"), "祝你早安快乐");
        assert_eq!(normalize_morning(""), MORNING_FALLBACK);
    }

    #[test]
    fn test_normalize_evening() {
        assert_eq!(normalize_evening("好梦"), "好梦晚安！");
        assert_eq!(normalize_evening("晚安，朋友"), "晚安，朋友");
        assert_eq!(normalize_evening(""), EVENING_FALLBACK);
    }

    proptest! {
        #[test]
        fn prop_markup_idempotent(s in "\\PC{0,64}") {
            let once = to_markup(&s);
            prop_assert_eq!(to_markup(&once), once.clone());
        }

        #[test]
        fn prop_plain_idempotent(s in "\\PC{0,64}") {
            let once = to_plain(&s);
            prop_assert_eq!(to_plain(&once), once.clone());
        }

        #[test]
        fn prop_never_ends_with_break(s in "\\PC{0,64}") {
            prop_assert!(!to_markup(&s).ends_with(MARKUP_BREAK));
            prop_assert!(!to_plain(&s).ends_with('\n'));
        }
    }
}
