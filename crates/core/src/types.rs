/// Alert identifiers are monotonic integers, process-scoped.
pub type AlertId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
