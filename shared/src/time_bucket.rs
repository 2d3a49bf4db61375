use chrono::{DateTime, Datelike, TimeZone, Timelike};
use std::fmt::Display;

/// Width of a bucket in minutes.
pub const BUCKET_MINUTES: u32 = 10;

/// A 10-minute wall-clock window, rendered as `2024/3/7 9:40 block`.
///
/// The edge function puts this string in the cache key and the PDF responder
/// prints it, so both sides must build it through [`TimeBucket::from_datetime`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeBucket(String);

impl TimeBucket {
    /// Floors `instant` to its bucket using the calendar fields of its own zone.
    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let minute = instant.minute() / BUCKET_MINUTES * BUCKET_MINUTES;

        Self(format!(
            "{}/{}/{} {}:{:02} block",
            instant.year(),
            instant.month(),
            instant.day(),
            instant.hour(),
            minute
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TimeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TimeBucket> for String {
    fn from(bucket: TimeBucket) -> Self {
        bucket.0
    }
}
