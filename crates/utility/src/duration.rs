use chrono::Duration;

/// Formats a duration as `h:mm:ss`. Negative durations are shown as zero.
pub fn format_hms(duration: &Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Converts fractional seconds to a chrono duration with millisecond precision.
pub fn from_secs_f64(seconds: f64) -> Duration {
    Duration::milliseconds((seconds * 1000.0).round() as i64)
}

/// Fractional seconds of a chrono duration.
pub fn as_secs_f64(duration: &Duration) -> f64 {
    match duration.num_microseconds() {
        Some(micros) => micros as f64 / 1e6,
        None => duration.num_milliseconds() as f64 / 1e3,
    }
}
