pub mod auth;
pub mod comments;
pub mod items;
pub mod looks;
pub mod middleware;
pub mod password;
pub mod posts;

use chrono::{DateTime, Utc};
use tracing::warn;

/// Parse a stored timestamp for a response. SQLite writes
/// "YYYY-MM-DD HH:MM:SS" without a timezone, so fall back to a naive
/// parse interpreted as UTC.
pub(crate) fn parse_timestamp(raw: &str, uid: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on '{}': {}", raw, uid, e);
            DateTime::default()
        })
}
