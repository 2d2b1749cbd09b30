//! Raw schema type classification.

use serde::{Serialize, Serializer};

/// Raw types whose value is a sequence of other values.
pub const COLLECTION_TYPES: &[&str] = &["set", "list", "map", "responseobject", "uservmresponse"];

/// Raw types whose value is a date/time.
pub const DATE_TYPES: &[&str] = &["date", "tzdate"];

/// Raw types that render as plain strings.
///
/// `object` is deliberately broad: it also catches unrelated types that
/// happen to be reported as `object`. Narrowing it changes generated output.
pub const STRING_TYPES: &[&str] = &[
    "object",
    "imageformat",
    "storagepoolstatus",
    "hypervisortype",
    "status",
    "type",
    "scopetype",
    "state",
    "url",
    "uuid",
    "powerstate",
    "outofbandmanagementresponse",
    "string",
];

/// Semantic target type of a raw schema type string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedType {
    /// Generic collection (`set`, `list`, `uservmresponse`, `map`).
    Collection,
    /// Any value (`responseobject`).
    Dynamic,
    Integer,
    DateTime,
    String,
    Boolean,
    /// Type not covered by the table, kept verbatim.
    Passthrough(String),
}

impl NormalizedType {
    /// Map a raw schema type by fixed table lookup.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "set" | "list" | "uservmresponse" | "map" => NormalizedType::Collection,
            "responseobject" => NormalizedType::Dynamic,
            "integer" | "long" | "short" | "int" => NormalizedType::Integer,
            "date" | "tzdate" => NormalizedType::DateTime,
            "boolean" => NormalizedType::Boolean,
            other if STRING_TYPES.contains(&other) => NormalizedType::String,
            other => NormalizedType::Passthrough(other.to_string()),
        }
    }

    /// Semantic name; passthrough types return the raw string.
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedType::Collection => "collection",
            NormalizedType::Dynamic => "dynamic",
            NormalizedType::Integer => "integer",
            NormalizedType::DateTime => "date-time",
            NormalizedType::String => "string",
            NormalizedType::Boolean => "boolean",
            NormalizedType::Passthrough(raw) => raw,
        }
    }

    /// PHP type name used in generated doc blocks.
    pub fn php_type(&self) -> &str {
        match self {
            NormalizedType::Collection => "array",
            NormalizedType::Dynamic => "mixed",
            NormalizedType::Integer => "integer",
            NormalizedType::DateTime => "\\DateTime",
            NormalizedType::String => "string",
            NormalizedType::Boolean => "boolean",
            NormalizedType::Passthrough(raw) => raw,
        }
    }
}

impl Serialize for NormalizedType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Whether a raw type is a collection type.
pub fn is_collection_type(raw: &str) -> bool {
    COLLECTION_TYPES.contains(&raw)
}

/// Whether a raw type is a date type.
pub fn is_date_type(raw: &str) -> bool {
    DATE_TYPES.contains(&raw)
}
