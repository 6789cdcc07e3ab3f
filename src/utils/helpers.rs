//! Helper utilities

use chrono::{DateTime, Utc};

/// Format an event date for template rendering (yyyy-MM-dd)
pub fn format_raffle_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Truncate a string to a maximum length, appending an ellipsis when cut
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_raffle_date() {
        let date = Utc.with_ymd_and_hms(2025, 5, 19, 18, 0, 0).unwrap();
        assert_eq!(format_raffle_date(Some(date)), "2025-05-19");
        assert_eq!(format_raffle_date(None), "");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer piece of text", 10), "a longe...");
    }
}
