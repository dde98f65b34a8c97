//! Shared formatting helpers for view models and the renderer.
//!
//! All helpers operate on character counts, not byte offsets, so multi-byte text is
//! never split in the middle of a code point.

use chrono::{DateTime, Utc};

/// Characters of description shown on a list card (about two lines).
pub const CARD_DESCRIPTION_CHARS: usize = 160;

/// Formats a posting date as `MMM d, yyyy`, e.g. `Jan 5, 2024`.
#[must_use]
pub fn format_posted_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Truncates `text` to at most `max_chars` characters, ending with `...` when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept.trim_end())
}

/// Joins tags as `[rust] [sql]`.
#[must_use]
pub fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("[{tag}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn posted_date_uses_short_month_and_unpadded_day() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 0).unwrap();
        assert_eq!(format_posted_date(&date), "Jan 5, 2024");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("München ist schön", 10), "München...");
        assert_eq!(truncate("abcdef", 2), "..");
    }

    #[test]
    fn tags_are_bracketed() {
        assert_eq!(format_tags(&["rust".into(), "sql".into()]), "[rust] [sql]");
        assert_eq!(format_tags(&[]), "");
    }
}
