//! Scalar field descriptions.

use serde::Serialize;

use super::types::{is_collection_type, is_date_type, NormalizedType};

/// Default `since` value for fields without version metadata.
pub const DEFAULT_SINCE: &str = "0.0";

/// Default raw type for fields that declare none.
pub const DEFAULT_TYPE: &str = "string";

/// One request parameter or response field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    name: String,
    description: String,
    #[serde(rename = "type")]
    typ: String,
    length: u32,
    required: bool,
    since: String,
    related: Vec<String>,
    #[serde(rename = "inResponse")]
    in_response: bool,
}

impl Variable {
    /// Creates a variable. `in_response` is false for request parameters.
    ///
    /// `name` must be non-empty. The compiler only builds variables from
    /// trimmed, non-empty names and skips every other record; debug builds
    /// assert this.
    pub fn new(in_response: bool, name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "variable name must not be empty");
        Self {
            name,
            description: String::new(),
            typ: DEFAULT_TYPE.to_string(),
            length: 0,
            required: false,
            since: DEFAULT_SINCE.to_string(),
            related: Vec::new(),
            in_response,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Raw schema type.
    pub fn typ(&self) -> &str {
        &self.typ
    }

    /// Sets the raw type; an empty type falls back to `string`.
    pub fn set_type(&mut self, typ: impl Into<String>) {
        let typ = typ.into();
        self.typ = if typ.is_empty() { DEFAULT_TYPE.to_string() } else { typ };
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn set_length(&mut self, length: u32) {
        self.length = length;
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn since(&self) -> &str {
        &self.since
    }

    pub fn set_since(&mut self, since: impl Into<String>) {
        self.since = since.into();
    }

    pub fn related(&self) -> &[String] {
        &self.related
    }

    pub fn set_related(&mut self, related: Vec<String>) {
        self.related = related;
    }

    /// Sets related names from the API's comma-separated form.
    pub fn set_related_str(&mut self, related: &str) {
        self.related = split_related(related);
    }

    pub fn in_response(&self) -> bool {
        self.in_response
    }

    pub fn is_date(&self) -> bool {
        is_date_type(&self.typ)
    }

    pub fn is_collection(&self) -> bool {
        is_collection_type(&self.typ)
    }

    pub fn normalized_type(&self) -> NormalizedType {
        NormalizedType::from_raw(&self.typ)
    }
}

/// Split a comma-separated `related` value.
pub fn split_related(related: &str) -> Vec<String> {
    related
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
