//! Human-readable display helpers
//!
//! Pure formatting functions used when listing domains and pages. Both are
//! side-effect free and order preserving: a larger byte count never renders
//! as a smaller-looking size, and a more recent timestamp never renders as
//! a longer elapsed time.

use chrono::{DateTime, Utc};

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Formats a byte count with binary prefixes
///
/// # Examples
///
/// ```
/// use webstash::humanize::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(2048), "2.0 KiB");
/// assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
/// ```
pub fn format_bytes(n: u64) -> String {
    if n < 1024 {
        return format!("{} B", n);
    }

    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

/// Formats the age of a timestamp relative to `now`
///
/// Anything under a minute reads "just now"; older timestamps step through
/// minutes, hours, and days, and anything past thirty days falls back to
/// the calendar date.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);

    let seconds = elapsed.num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = elapsed.num_days();
    if days < 30 {
        return format!("{}d ago", days);
    }

    then.format("%Y-%m-%d").to_string()
}
