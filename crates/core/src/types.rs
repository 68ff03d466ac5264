/// Row id of the `todos` table (`BIGSERIAL`).
pub type DbId = i64;

/// Stored and serialized in UTC (RFC 3339 on the wire).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
