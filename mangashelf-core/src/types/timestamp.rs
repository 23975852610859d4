//! Epoch-millisecond timestamps
//!
//! The upstream API encodes 64-bit timestamps as decimal strings, while
//! exported libraries often carry plain numbers. Both are accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Convert an epoch-millisecond timestamp to a UTC datetime
pub fn to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMillis {
    Number(i64),
    Text(String),
}

/// Deserialize an optional timestamp given as a number, a numeric string or null
pub(crate) fn deserialize_opt_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawMillis>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawMillis::Number(n)) => Ok(Some(n)),
        Some(RawMillis::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawMillis::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {s:?}"))),
    }
}
