//! User-configured replacements for generated type identities.

use std::collections::BTreeMap;
use serde::Serialize;

use crate::diagnostic::GeneratorError;

/// A replacement for one generated class.
///
/// The overload fully replaces the identity of the class it targets: its FQ
/// name, its short class name and (when given) its swagger definition name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverloadedClass {
    /// Derived class name being replaced.
    #[serde(rename = "name")]
    overloaded_class: String,

    /// Fully-qualified name of the replacement class.
    #[serde(rename = "overload")]
    fq_name: String,

    /// Alternate swagger definition name.
    #[serde(rename = "swagger")]
    swagger_name: Option<String>,

    #[serde(skip)]
    class_name: String,
}

impl OverloadedClass {
    pub fn new(
        overloaded_class: impl Into<String>,
        fq_name: impl Into<String>,
        swagger_name: Option<String>,
    ) -> Result<Self, GeneratorError> {
        let overloaded_class = overloaded_class.into().trim().to_string();
        let fq_name = fq_name.into().trim().to_string();

        if overloaded_class.is_empty() {
            return Err(GeneratorError::InvalidOverload {
                name: overloaded_class,
                reason: "name must not be empty".to_string(),
            });
        }

        let class_name = fq_name
            .split('\\')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .last()
            .unwrap_or_default()
            .to_string();

        if class_name.is_empty() {
            return Err(GeneratorError::InvalidOverload {
                name: overloaded_class,
                reason: "overload must be a non-empty fully-qualified class name".to_string(),
            });
        }

        let swagger_name = swagger_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            overloaded_class,
            fq_name,
            swagger_name,
            class_name,
        })
    }

    pub fn overloaded_class(&self) -> &str {
        &self.overloaded_class
    }

    pub fn fq_name(&self) -> &str {
        &self.fq_name
    }

    pub fn swagger_name(&self) -> Option<&str> {
        self.swagger_name.as_deref()
    }

    /// Last segment of the FQ name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

/// Overloads keyed by the derived class name they replace.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct OverloadTable {
    classes: BTreeMap<String, OverloadedClass>,
}

impl OverloadTable {
    /// Add an overload. Two overloads for one class name are rejected.
    pub fn insert(&mut self, class: OverloadedClass) -> Result<(), GeneratorError> {
        if self.classes.contains_key(class.overloaded_class()) {
            return Err(GeneratorError::InvalidOverload {
                name: class.overloaded_class().to_string(),
                reason: "declared more than once".to_string(),
            });
        }
        self.classes.insert(class.overloaded_class().to_string(), class);
        Ok(())
    }

    /// Overload configured for a derived class name, if any.
    pub fn resolve(&self, class_name: &str) -> Option<&OverloadedClass> {
        self.classes.get(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverloadedClass> {
        self.classes.values()
    }
}
