//! Duration parsing utilities.
//!
//! Store timeouts are given on the command line or in the environment as
//! short strings such as "5s" or "500ms".

use std::time::Duration;

/// Parse duration string (e.g., "500ms", "5s", "2m") into a [`Duration`]
///
/// Supported formats:
/// - Raw seconds: "5"
/// - Milliseconds: "500ms", "500msec", "500millis"
/// - Seconds: "5s", "5sec", "5secs", "5second", "5seconds"
/// - Minutes: "2m", "2min", "2mins", "2minute", "2minutes"
///
/// # Examples
/// ```
/// use rps_upstream::utils::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("5"), Ok(Duration::from_secs(5)));
/// assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
/// assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
/// assert!(parse_duration("soon").is_err());
/// ```
pub fn parse_duration(duration: &str) -> Result<Duration, String> {
    let duration = duration.trim();
    let (number, unit) = split_number_part(duration);

    let value: u64 = number
        .parse()
        .map_err(|_| format!("Invalid duration format: {}", duration))?;

    match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => Ok(Duration::from_secs(value)),
        "ms" | "msec" | "millis" => Ok(Duration::from_millis(value)),
        "m" | "min" | "mins" | "minute" | "minutes" => value
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("Duration out of range: {}", duration)),
        _ => Err(format!("Invalid duration unit '{}' in: {}", unit, duration)),
    }
}

/// Split a duration string at the first non-digit character
fn split_number_part(duration: &str) -> (&str, &str) {
    let idx = duration
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(duration.len());
    duration.split_at(idx)
}
