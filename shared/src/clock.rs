use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::time_bucket::TimeBucket;

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Zone whose calendar fields a [`TimeBucket`] is built from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    Utc,
    /// The execution environment's local zone (`TZ`).
    #[default]
    Local,
}

impl TimestampZone {
    pub fn bucket(&self, instant: DateTime<Utc>) -> TimeBucket {
        match self {
            TimestampZone::Utc => TimeBucket::from_datetime(&instant),
            TimestampZone::Local => TimeBucket::from_datetime(&instant.with_timezone(&Local)),
        }
    }

    /// Whether buckets in this zone can disagree with the UTC buckets used in
    /// the cache key at `instant`.
    pub fn diverges_from_utc(&self, instant: DateTime<Utc>) -> bool {
        match self {
            TimestampZone::Utc => false,
            TimestampZone::Local => {
                instant
                    .with_timezone(&Local)
                    .offset()
                    .local_minus_utc()
                    != 0
            }
        }
    }
}
