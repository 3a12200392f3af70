//! Request body parsing.
//!
//! Every endpoint reads credentials and payload from one JSON body, so bodies
//! are parsed leniently: an empty body or a non-object document yields the
//! default (all fields absent), and a field of the wrong JSON type is treated
//! as absent. Only bytes that are not JSON at all are rejected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::Error;

pub(crate) const INVALID_JSON_MESSAGE: &str = "Request body must be valid JSON";

/// Parse `body` into `T`.
///
/// # Errors
///
/// `InvalidRequest` when the bytes are not a JSON document.
pub(crate) fn parse_body<T>(body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let value: Value =
        serde_json::from_slice(body).map_err(|_| Error::invalid_request(INVALID_JSON_MESSAGE))?;
    if !value.is_object() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|_| Error::invalid_request(INVALID_JSON_MESSAGE))
}

/// Deserialize a string field, mapping any other JSON type to `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

/// Deserialize a nested object, mapping any other JSON type to `None`.
pub(crate) fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}
