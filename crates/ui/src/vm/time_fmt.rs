use chrono::{DateTime, Local, Utc};

/// Save indicator text in local wall-clock time.
#[must_use]
pub fn format_last_saved(value: DateTime<Utc>) -> String {
    format!("Last saved: {}", value.with_timezone(&Local).format("%H:%M:%S"))
}
