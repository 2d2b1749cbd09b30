//! Raw schema records as returned by `listApis` and `listCapabilities`.
//!
//! The API description is loosely typed: booleans arrive as strings, lengths
//! as strings, and some field entries are empty objects. Parsing here never
//! rejects a field record; the compiler decides what to skip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One API command description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawApi {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub isasync: Option<bool>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub since: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub related: Option<String>,

    #[serde(default, deserialize_with = "lenient_fields")]
    pub params: Vec<RawField>,

    #[serde(default, deserialize_with = "lenient_fields")]
    pub response: Vec<RawField>,
}

impl RawApi {
    /// Parse one `listApis` entry; anything unreadable becomes a blank record.
    pub fn from_value_lenient(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// The name with surrounding whitespace removed, if non-empty.
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// One request parameter or response field description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawField {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub typ: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub required: Option<bool>,

    #[serde(default, deserialize_with = "lenient_length")]
    pub length: Option<u32>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub since: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub related: Option<String>,

    /// Nested fields. Presence marks a reference to a shared object type.
    #[serde(default, deserialize_with = "lenient_nested")]
    pub response: Option<Vec<RawField>>,
}

impl RawField {
    /// Trimmed name, or `None` when missing or blank.
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Capabilities of the CloudStack instance the schema was read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default, deserialize_with = "lenient_string")]
    pub cloudstackversion: Option<String>,
}

impl Capabilities {
    pub fn version(&self) -> &str {
        self.cloudstackversion.as_deref().unwrap_or("unknown")
    }
}

/// Interpret a JSON value as a boolean the way the API means it.
pub(crate) fn bool_like(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(bool_like(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_length<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => Some(n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0)),
        Value::String(s) => Some(s.trim().parse::<u32>().unwrap_or(0)),
        _ => None,
    })
}

fn lenient_fields<'de, D>(deserializer: D) -> Result<Vec<RawField>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_nested(deserializer)?.unwrap_or_default())
}

fn lenient_nested<'de, D>(deserializer: D) -> Result<Option<Vec<RawField>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Null => return Ok(None),
        _ => return Ok(Some(Vec::new())),
    };

    // Entries that are not objects are treated as blank records.
    Ok(Some(
        entries
            .into_iter()
            .map(|entry| serde_json::from_value::<RawField>(entry).unwrap_or_default())
            .collect(),
    ))
}
