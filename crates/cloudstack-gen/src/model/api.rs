//! API command descriptions.

use serde::Serialize;

use super::container::VariableContainer;
use super::object::{ucfirst, ObjectVariable};
use super::variable::DEFAULT_SINCE;

/// Names of the paging parameters.
pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "pagesize";

/// One API command with its request parameters and response root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Api {
    pub name: String,
    pub description: String,
    pub since: String,
    pub related: Vec<String>,
    #[serde(rename = "async")]
    pub is_async: bool,
    #[serde(rename = "eventType")]
    pub event_type: Option<String>,
    pub parameters: VariableContainer,
    /// Response root. Never shared, always in-response.
    pub response: ObjectVariable,
}

impl Api {
    pub fn new(name: impl Into<String>, response: ObjectVariable) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            since: DEFAULT_SINCE.to_string(),
            related: Vec::new(),
            is_async: false,
            event_type: None,
            parameters: VariableContainer::default(),
            response,
        }
    }

    /// Name of the generated request class.
    pub fn request_class_name(&self) -> String {
        format!("{}Request", ucfirst(&self.name))
    }

    /// Whether the API accepts both paging parameters.
    pub fn is_pageable(&self) -> bool {
        self.parameters.contains(PAGE_PARAM) && self.parameters.contains(PAGE_SIZE_PARAM)
    }

    /// Whether the API returns a counted list of results.
    pub fn is_list(&self) -> bool {
        self.is_pageable() || self.name.starts_with("list")
    }
}
