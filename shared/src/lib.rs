pub mod clock;
pub mod time_bucket;
pub mod utils;

/// Request header the edge function sets and the CDN cache policy keys on.
pub const DATETIME_BLOCK_HEADER: &str = "x-datetime-block";
