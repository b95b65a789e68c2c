//! Helpers for reading and writing Capsule JSON payloads
//!
//! The Capsule API is loose about its JSON:
//!
//! - scalars are frequently quoted (`"id": "100"`, `"probability": "50"`)
//! - a collection with one element is sent as a bare object instead of an
//!   array, and an empty collection is omitted entirely
//! - nested collections are wrapped in a singular key
//!   (`"attachments": {"attachment": [...]}`)
//!
//! The functions here absorb those quirks so the domain types can use plain
//! Rust field types.

use chrono::{DateTime, NaiveDate};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Deserializes a scalar that may arrive as a number, boolean or string
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let text = Scalar::deserialize(deserializer)?.into_text();
    text.trim().parse::<T>().map_err(de::Error::custom)
}

/// Like [`lenient`], but `null`, a missing field and `""` all become `None`
///
/// Use together with `#[serde(default)]`.
pub fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(scalar) => {
            let text = scalar.into_text();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed.parse::<T>().map(Some).map_err(de::Error::custom)
            }
        }
    }
}

/// Deserializes a calendar date sent either as `2012-09-30` or as a full
/// timestamp such as `2012-09-30T00:00:00Z`
///
/// Use together with `#[serde(default)]`.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| Some(timestamp.date_naive()))
        .map_err(de::Error::custom)
}

/// Deserializes either a single element or an array of elements
///
/// Use together with `#[serde(default)]`.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

/// Builds a list of records from a collection node
///
/// Accepts an array, a single object, or `null`.
pub fn collection_from_node<T: DeserializeOwned>(node: &Value) -> Result<Vec<T>, CoreError> {
    match node {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| T::deserialize(item).map_err(CoreError::from))
            .collect(),
        other => Ok(vec![T::deserialize(other)?]),
    }
}

/// Reads a collection wrapped in a singular key, such as
/// `{"attachment": [...]}`, or given directly as an array or object
pub fn unwrap_collection<T: DeserializeOwned>(node: &Value, inner: &str) -> Result<Vec<T>, CoreError> {
    match node.get(inner) {
        Some(wrapped) => collection_from_node(wrapped),
        None if node.as_object().is_some_and(|map| map.is_empty()) => Ok(Vec::new()),
        None => collection_from_node(node),
    }
}

/// Reads `body[outer][inner]` as a list of records
///
/// Capsule omits `inner` when the collection is empty, so a missing key
/// yields an empty list rather than an error.
pub fn extract_collection<T: DeserializeOwned>(
    body: &Value,
    outer: &str,
    inner: &str,
) -> Result<Vec<T>, CoreError> {
    match body.get(outer).and_then(|node| node.get(inner)) {
        Some(node) => collection_from_node(node),
        None => Ok(Vec::new()),
    }
}

/// Reads `body[root]` as a single record
pub fn extract_member<T: DeserializeOwned>(body: &Value, root: &str) -> Result<T, CoreError> {
    let node = body.get(root).ok_or_else(|| CoreError::missing_key(root))?;
    Ok(T::deserialize(node)?)
}

/// Wraps a payload in its root key: `{"task": {...}}`
pub fn wrap_root(root: &str, payload: Value) -> Value {
    let mut map = Map::new();
    map.insert(root.to_string(), payload);
    Value::Object(map)
}

/// Drops `null` values, empty strings, empty arrays and empty objects from
/// a JSON object so they are not sent to the server
pub fn compact(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, compact(value)))
                .filter(|(_, value)| !is_blank(value))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(compact).collect()),
        other => other,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Returns a copy of `record` with the keys of `patch` assigned over it
///
/// Keys may use the wire (camelCase) names or snake_case. A `null` in the
/// patch clears the attribute. Keys the record does not carry fail with
/// [`CoreError::UnknownAttributes`].
pub fn merge_attributes<T>(record: &T, patch: &Value) -> Result<T, CoreError>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(changes) = patch else {
        return Err(CoreError::InvalidAttributes(patch.to_string()));
    };
    let changes: Map<String, Value> = changes
        .iter()
        .map(|(key, value)| (camel_case(key), value.clone()))
        .collect();

    let mut current = serde_json::to_value(record)?;
    match current.as_object_mut() {
        Some(fields) => {
            for (key, value) in &changes {
                fields.insert(key.clone(), value.clone());
            }
        }
        None => return Err(CoreError::InvalidAttributes(current.to_string())),
    }
    let merged: T = serde_json::from_value(current)?;

    // A non-blank value that does not survive the round trip had no field to land in
    let written = serde_json::to_value(&merged)?;
    let unknown: Vec<String> = changes
        .iter()
        .filter(|(key, value)| !is_blank(value) && written.get(key.as_str()).map_or(true, is_blank))
        .map(|(key, _)| key.clone())
        .collect();
    if !unknown.is_empty() {
        return Err(CoreError::UnknownAttributes(unknown));
    }

    Ok(merged)
}

/// `first_name` becomes `firstName`; keys without underscores are kept
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Extracts the record id from a `Location` header
///
/// `https://sample.capsulecrm.com/api/party/1000/history/101` yields `101`.
/// Returns `None` when the last path segment is not numeric.
pub fn id_from_location(location: &str) -> Option<u64> {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_option")]
        probability: Option<u8>,
        #[serde(default, deserialize_with = "one_or_many")]
        tags: Vec<String>,
    }

    #[test]
    fn test_lenient_option_accepts_strings() {
        let probe: Probe = serde_json::from_value(json!({"probability": "50"})).unwrap();
        assert_eq!(probe.probability, Some(50));

        let probe: Probe = serde_json::from_value(json!({"probability": ""})).unwrap();
        assert_eq!(probe.probability, None);
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("due_date_time"), "dueDateTime");
        assert_eq!(camel_case("firstName"), "firstName");
        assert_eq!(camel_case("pictureURL"), "pictureURL");
        assert_eq!(camel_case("note"), "note");
    }

    #[test]
    fn test_one_or_many_single_object() {
        let probe: Probe = serde_json::from_value(json!({"tags": "VIP"})).unwrap();
        assert_eq!(probe.tags, vec!["VIP".to_string()]);

        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert!(probe.tags.is_empty());
    }

    #[derive(Debug, Deserialize)]
    struct Due {
        #[serde(default, deserialize_with = "lenient_date")]
        due_date: Option<NaiveDate>,
    }

    #[test]
    fn test_lenient_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2012, 9, 30);

        let plain: Due = serde_json::from_value(json!({"due_date": "2012-09-30"})).unwrap();
        let stamped: Due = serde_json::from_value(json!({"due_date": "2012-09-30T00:00:00Z"})).unwrap();
        let missing: Due = serde_json::from_value(json!({})).unwrap();

        assert_eq!(plain.due_date, expected);
        assert_eq!(stamped.due_date, expected);
        assert_eq!(missing.due_date, None);
    }

    #[test]
    fn test_id_from_location() {
        assert_eq!(
            id_from_location("https://sample.capsulecrm.com/api/party/1000/history/101"),
            Some(101)
        );
        assert_eq!(
            id_from_location("https://sample.capsulecrm.com/api/party/1000/tag/A%20Test%20Tag"),
            None
        );
    }

    #[test]
    fn test_compact_removes_blank_values() {
        let compacted = compact(json!({"a": null, "b": [], "c": "x", "d": {"e": ""}}));
        assert_eq!(compacted, json!({"c": "x"}));
    }
}
