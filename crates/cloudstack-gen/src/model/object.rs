//! Structured object descriptions and their resolved type identity.

use serde::Serialize;

use super::container::VariableContainer;
use super::variable::Variable;
use crate::config::{OverloadTable, OverloadedClass};

/// Prefix of every generated swagger definition name.
pub const SWAGGER_PREFIX: &str = "CloudStack";

/// Sub-namespace holding generated response classes.
pub const RESPONSE_NAMESPACE: &str = "CloudStackResponse";

/// The effective identity of a generated object type.
///
/// Resolved once, when the object is created. With an overload configured
/// every value comes from the overload; otherwise every value is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeIdentity {
    #[serde(rename = "className")]
    pub class_name: String,
    #[serde(rename = "fqName")]
    pub fq_name: String,
    #[serde(rename = "swaggerName")]
    pub swagger_name: String,
    #[serde(rename = "overloaded")]
    pub overloaded: bool,
}

impl TypeIdentity {
    fn derived(class_name: &str, namespace: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            fq_name: response_fq_name(namespace, class_name),
            swagger_name: format!("{}{}", SWAGGER_PREFIX, class_name),
            overloaded: false,
        }
    }

    fn from_overload(overload: &OverloadedClass) -> Self {
        // Without an explicit swagger name the definition is named after the
        // overload class, never the derived class. Templates that expect the
        // derived swagger name need `swagger` set on the overload.
        let swagger_name = match overload.swagger_name() {
            Some(name) => name.to_string(),
            None => format!("{}{}", SWAGGER_PREFIX, overload.class_name()),
        };
        Self {
            class_name: overload.class_name().to_string(),
            fq_name: overload.fq_name().to_string(),
            swagger_name,
            overloaded: true,
        }
    }
}

/// A field whose value is itself a structured object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectVariable {
    #[serde(flatten)]
    variable: Variable,
    namespace: String,
    shared: bool,
    #[serde(rename = "defaultClassName")]
    default_class_name: String,
    identity: TypeIdentity,
    overload: Option<OverloadedClass>,
    properties: VariableContainer,
}

impl ObjectVariable {
    /// Creates an object and resolves its identity against `overloads`.
    pub fn new(
        in_response: bool,
        name: impl Into<String>,
        namespace: impl Into<String>,
        shared: bool,
        overloads: &OverloadTable,
    ) -> Self {
        let variable = Variable::new(in_response, name);
        let namespace = namespace.into();
        let default_class_name = derive_class_name(variable.name(), shared);

        let overload = overloads.resolve(&default_class_name).cloned();
        let identity = match &overload {
            Some(overload) => TypeIdentity::from_overload(overload),
            None => TypeIdentity::derived(&default_class_name, &namespace),
        };

        Self {
            variable,
            namespace,
            shared,
            default_class_name,
            identity,
            overload,
            properties: VariableContainer::default(),
        }
    }

    /// Scalar attributes (name, type, description, ...).
    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn variable_mut(&mut self) -> &mut Variable {
        &mut self.variable
    }

    pub fn name(&self) -> &str {
        self.variable.name()
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    pub fn properties(&self) -> &VariableContainer {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut VariableContainer {
        &mut self.properties
    }

    pub fn overload(&self) -> Option<&OverloadedClass> {
        self.overload.as_ref()
    }

    pub fn identity(&self) -> &TypeIdentity {
        &self.identity
    }

    /// Class name derived from the object name, ignoring overloads.
    pub fn default_class_name(&self) -> &str {
        &self.default_class_name
    }

    /// Effective short class name.
    pub fn class_name(&self) -> &str {
        &self.identity.class_name
    }

    /// Effective fully-qualified class name.
    pub fn fq_name(&self) -> &str {
        &self.identity.fq_name
    }

    /// Effective swagger definition name.
    pub fn swagger_name(&self) -> &str {
        &self.identity.swagger_name
    }

    /// PHP type of a value holding this object.
    pub fn php_type(&self) -> &str {
        self.fq_name()
    }
}

/// `ucfirst(name)`, suffixed with `Response` unless shared.
pub fn derive_class_name(name: &str, shared: bool) -> String {
    let class = ucfirst(name);
    if shared {
        class
    } else {
        format!("{}Response", class)
    }
}

/// Fully-qualified name of a generated response class.
pub fn response_fq_name(namespace: &str, class_name: &str) -> String {
    if namespace.is_empty() {
        format!("\\{}\\{}", RESPONSE_NAMESPACE, class_name)
    } else {
        format!("\\{}\\{}\\{}", namespace, RESPONSE_NAMESPACE, class_name)
    }
}

/// Uppercase the first character.
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
