//! Shared utility functions used across multiple modules.

use chrono::{DateTime, Utc};

const MINUTES_IN_DAY: u64 = 1_440;
const MINUTES_IN_MONTH: u64 = 43_200;

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Human-readable distance between `then` and `now`, with a suffix.
///
/// Mirrors the wording of date-fns `formatDistanceToNow(.., { addSuffix: true })`:
/// "less than a minute ago", "5 minutes ago", "about 2 hours ago", "3 days ago".
/// Timestamps in the future (clock skew) read as "in 5 minutes".
pub fn format_time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds();
    let distance = describe_distance(seconds.unsigned_abs());
    if seconds < 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn describe_distance(seconds: u64) -> String {
    let minutes = (seconds + 30) / 60;

    if seconds < 30 {
        "less than a minute".to_string()
    } else if minutes <= 1 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        format!("about {} hours", (minutes + 30) / 60)
    } else if minutes < 2_520 {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        format!("{} days", (minutes + MINUTES_IN_DAY / 2) / MINUTES_IN_DAY)
    } else if minutes < 2 * MINUTES_IN_MONTH {
        let months = (minutes + MINUTES_IN_MONTH / 2) / MINUTES_IN_MONTH;
        format!("about {}", plural(months, "month"))
    } else {
        let months = minutes / MINUTES_IN_MONTH;
        if months < 12 {
            return format!("{months} months");
        }
        let years = months / 12;
        match months % 12 {
            0..=2 => format!("about {}", plural(years, "year")),
            3..=8 => format!("over {}", plural(years, "year")),
            _ => format!("almost {}", plural(years + 1, "year")),
        }
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn ago(seconds: i64) -> String {
        let now = Utc::now();
        format_time_since(now - Duration::seconds(seconds), now)
    }

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" https://example.com ".to_string())),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn is_http_url_accepts_valid_schemes() {
        assert!(is_http_url("http://localhost"));
        assert!(is_http_url("https://example.com"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
    }

    #[test]
    fn time_since_short_distances() {
        assert_eq!(ago(0), "less than a minute ago");
        assert_eq!(ago(29), "less than a minute ago");
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(5 * 60), "5 minutes ago");
        assert_eq!(ago(50 * 60), "about 1 hour ago");
        assert_eq!(ago(3 * 60 * 60), "about 3 hours ago");
    }

    #[test]
    fn time_since_long_distances() {
        let day = 24 * 60 * 60;
        assert_eq!(ago(day + 60), "1 day ago");
        assert_eq!(ago(3 * day), "3 days ago");
        assert_eq!(ago(35 * day), "about 1 month ago");
        assert_eq!(ago(100 * day), "3 months ago");
        assert_eq!(ago(370 * day), "about 1 year ago");
        assert_eq!(ago(2 * 365 * day + 180 * day), "over 2 years ago");
    }

    #[test]
    fn time_since_future_timestamp_reads_forward() {
        let now = Utc::now();
        assert_eq!(
            format_time_since(now + Duration::minutes(5), now),
            "in 5 minutes"
        );
    }
}
