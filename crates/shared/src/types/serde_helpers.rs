//! Lenient deserializers for form-shaped payloads.
//!
//! Form state coming from the browser or the backend mixes representations:
//! `""` for "not selected", numeric ids as strings, dates with a time suffix.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional integer id from a number, a numeric string,
/// `""` or `null`. Zero is kept as-is; callers decide what the sentinel means.
pub fn optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|raw| Some(T::from(raw)))
            .ok_or_else(|| D::Error::custom(format!("id is not an integer: {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(|raw| Some(T::from(raw)))
            .map_err(|_| D::Error::custom(format!("id is not an integer: {s:?}"))),
        Some(other) => Err(D::Error::custom(format!("unexpected id value: {other}"))),
    }
}

/// Like [`optional_id`] but yields the `0` sentinel instead of `None`.
pub fn id_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64> + Default,
{
    optional_id(deserializer).map(Option::unwrap_or_default)
}

/// Deserializes a string, mapping `null` to `""`.
pub fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserializes an optional calendar date. Accepts `YYYY-MM-DD`, a full
/// `YYYY-MM-DDTHH:MM:SS` timestamp (the date part is kept), `""` and `null`.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);
    NaiveDate::from_str(date_part)
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid date {raw:?}: {e}")))
}
