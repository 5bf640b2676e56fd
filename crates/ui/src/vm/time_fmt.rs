use chrono::{DateTime, Duration, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %H:%M").to_string()
}

/// Total study time as `1h 05m`, or `12m` under an hour.
#[must_use]
pub fn format_study_time(total: Duration) -> String {
    let minutes = total.num_minutes().max(0);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else {
        format!("{minutes}m")
    }
}
