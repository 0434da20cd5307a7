//! Duration parsing and formatting.
//!
//! All durations in rudoro are `chrono::Duration` values with whole-second
//! resolution.

use chrono::Duration;

/// Format a duration as MM:SS.
///
/// Minutes are not wrapped into hours, so 75 minutes renders as `75:00`.
#[must_use]
pub fn format_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as HH:MM, truncating leftover seconds.
#[must_use]
pub fn format_hhmm(d: Duration) -> String {
    let total_minutes = d.num_minutes().abs();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{hours:02}:{minutes:02}")
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is read as minutes. Returns `None` for zero, negative or
/// malformed input.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return positive_seconds(minutes.checked_mul(60)?);
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }
        if current_num.is_empty() {
            return None;
        }

        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total_seconds = add_part(total_seconds, &current_num, unit)?;
        current_num.clear();
    }

    // Trailing number without a unit counts as minutes
    if !current_num.is_empty() {
        total_seconds = add_part(total_seconds, &current_num, 60)?;
    }

    positive_seconds(total_seconds)
}

/// Add `digits` x `unit` seconds to `total`. `None` on overflow.
fn add_part(total: i64, digits: &str, unit: i64) -> Option<i64> {
    let num: i64 = digits.parse().ok()?;
    total.checked_add(num.checked_mul(unit)?)
}

fn positive_seconds(seconds: i64) -> Option<Duration> {
    if seconds > 0 {
        Duration::try_seconds(seconds)
    } else {
        None
    }
}

/// Parse a duration for a clap argument.
///
/// # Errors
///
/// Returns a message suitable for clap when the value is not a positive
/// duration.
pub fn parse_duration_arg(s: &str) -> Result<Duration, String> {
    parse_duration(s).ok_or_else(|| format!("invalid duration '{s}' (try 25m, 1h30m or 90s)"))
}
