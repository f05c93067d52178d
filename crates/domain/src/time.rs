//! Time and timestamp helpers.

use chrono::{DateTime, Local, NaiveTime, Utc};

/// UTC timestamp used for log entries and run reports.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current wall-clock time of day in the host's local timezone.
///
/// Time-range conditions are written by users in local time.
#[must_use]
pub fn local_time_of_day() -> NaiveTime {
    Local::now().time()
}
