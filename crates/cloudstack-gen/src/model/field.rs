//! Entries of a variable container.

use serde::Serialize;

use super::variable::Variable;

/// Key of a shared object in the registry. Equal to the object's name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SharedObjectKey {
    name: String,
}

impl SharedObjectKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

/// A field of a request or response: a scalar, or a reference to a shared object.
///
/// Object fields never own their object; the object lives in the
/// [`SharedObjectRegistry`](crate::compile::SharedObjectRegistry) and every
/// referencing site resolves it by key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Field {
    Scalar(Variable),
    Object(SharedObjectKey),
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Scalar(var) => var.name(),
            Field::Object(key) => key.as_str(),
        }
    }

    /// Shared object references are response-only and never required.
    pub fn is_required(&self) -> bool {
        match self {
            Field::Scalar(var) => var.is_required(),
            Field::Object(_) => false,
        }
    }

    pub fn as_scalar(&self) -> Option<&Variable> {
        match self {
            Field::Scalar(var) => Some(var),
            Field::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&SharedObjectKey> {
        match self {
            Field::Scalar(_) => None,
            Field::Object(key) => Some(key),
        }
    }
}

impl From<Variable> for Field {
    fn from(var: Variable) -> Self {
        Field::Scalar(var)
    }
}

impl From<SharedObjectKey> for Field {
    fn from(key: SharedObjectKey) -> Self {
        Field::Object(key)
    }
}
