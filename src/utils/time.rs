use chrono::DateTime;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Format unix seconds as `DD Mon YYYY` (UTC), e.g. `14 Nov 2023`.
/// Out-of-range timestamps render as `-`.
pub fn format_date(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
