//! JSON manifest of the compiled model.
//!
//! The manifest is the hand-off point to template renderers living outside
//! this crate. It contains everything they need with identities, types and
//! doc tags already resolved, and no timestamps, so identical input always
//! produces byte-identical output.

use serde::Serialize;

use super::helpers::{determine_swagger_name, find_imports, php_type_hint, php_type_tag};
use super::{GeneratedCode, RenderContext, Renderer};
use crate::compile::SharedObjectRegistry;
use crate::config::OverloadedClass;
use crate::diagnostic::GeneratorError;
use crate::model::{Api, Field, ObjectVariable, TypeIdentity};

/// Name of the manifest file in the output directory.
pub const MANIFEST_FILE: &str = "model.json";

/// Renders the compiled model to [`MANIFEST_FILE`].
#[derive(Debug, Clone, Default)]
pub struct ManifestRenderer;

impl Renderer for ManifestRenderer {
    fn name(&self) -> &str {
        "manifest"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<GeneratedCode, GeneratorError> {
        let registry = &ctx.model.shared_objects;

        let manifest = Manifest {
            generator: GeneratorInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            cloudstack_version: ctx.capabilities.version(),
            namespace: &ctx.config.namespace,
            swagger_version: ctx.config.swagger_version.as_number(),
            overloads: ctx.config.overloads.iter().collect(),
            apis: ctx.model.apis.iter().map(|api| ApiEntry::new(api, registry)).collect(),
            shared_objects: registry
                .iter()
                .map(|(_, obj)| ObjectEntry::new(obj, registry))
                .collect(),
        };

        let content = serde_json::to_string_pretty(&manifest).map_err(|e| GeneratorError::RenderFailed {
            message: format!("Failed to serialize manifest: {}", e),
        })?;

        Ok(GeneratedCode {
            files: vec![(MANIFEST_FILE.to_string(), content + "\n")],
        })
    }
}

#[derive(Serialize)]
struct Manifest<'a> {
    generator: GeneratorInfo,
    #[serde(rename = "cloudstackVersion")]
    cloudstack_version: &'a str,
    namespace: &'a str,
    #[serde(rename = "swaggerVersion")]
    swagger_version: i64,
    overloads: Vec<&'a OverloadedClass>,
    apis: Vec<ApiEntry<'a>>,
    #[serde(rename = "sharedObjects")]
    shared_objects: Vec<ObjectEntry<'a>>,
}

#[derive(Serialize)]
struct GeneratorInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ApiEntry<'a> {
    name: &'a str,
    description: &'a str,
    since: &'a str,
    related: &'a [String],
    #[serde(rename = "async")]
    is_async: bool,
    #[serde(rename = "eventType")]
    event_type: Option<&'a str>,
    pageable: bool,
    list: bool,
    #[serde(rename = "requestClassName")]
    request_class_name: String,
    #[serde(rename = "requiredParameters")]
    required_parameters: Vec<&'a str>,
    parameters: Vec<FieldEntry<'a>>,
    response: ObjectEntry<'a>,
}

impl<'a> ApiEntry<'a> {
    fn new(api: &'a Api, registry: &'a SharedObjectRegistry) -> Self {
        Self {
            name: &api.name,
            description: &api.description,
            since: &api.since,
            related: &api.related,
            is_async: api.is_async,
            event_type: api.event_type.as_deref(),
            pageable: api.is_pageable(),
            list: api.is_list(),
            request_class_name: api.request_class_name(),
            required_parameters: api.parameters.required().into_iter().map(Field::name).collect(),
            parameters: api.parameters.iter().filter_map(|f| FieldEntry::new(f, registry)).collect(),
            response: ObjectEntry::new(&api.response, registry),
        }
    }
}

#[derive(Serialize)]
struct ObjectEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    typ: &'a str,
    description: &'a str,
    since: &'a str,
    shared: bool,
    collection: bool,
    identity: &'a TypeIdentity,
    imports: Vec<String>,
    properties: Vec<FieldEntry<'a>>,
}

impl<'a> ObjectEntry<'a> {
    fn new(obj: &'a ObjectVariable, registry: &'a SharedObjectRegistry) -> Self {
        let var = obj.variable();
        Self {
            name: obj.name(),
            typ: var.typ(),
            description: var.description(),
            since: var.since(),
            shared: obj.is_shared(),
            collection: var.is_collection(),
            identity: obj.identity(),
            imports: find_imports(obj, registry),
            properties: obj.properties().iter().filter_map(|f| FieldEntry::new(f, registry)).collect(),
        }
    }
}

#[derive(Serialize)]
struct FieldEntry<'a> {
    name: &'a str,
    kind: &'static str,
    #[serde(rename = "type")]
    typ: &'a str,
    #[serde(rename = "normalizedType")]
    normalized_type: String,
    description: &'a str,
    required: bool,
    length: u32,
    since: &'a str,
    related: &'a [String],
    date: bool,
    collection: bool,
    #[serde(rename = "phpTypeTag")]
    php_type_tag: String,
    #[serde(rename = "phpTypeHint")]
    php_type_hint: String,
    #[serde(rename = "swaggerName")]
    swagger_name: String,
    #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
    class_name: Option<&'a str>,
}

impl<'a> FieldEntry<'a> {
    /// Returns `None` for an object key the registry does not know.
    fn new(field: &'a Field, registry: &'a SharedObjectRegistry) -> Option<Self> {
        let object = field.as_object().and_then(|key| registry.get(key));
        let var = match (field, object) {
            (Field::Scalar(var), _) => var,
            (Field::Object(_), Some(obj)) => obj.variable(),
            (Field::Object(_), None) => return None,
        };

        Some(Self {
            name: field.name(),
            kind: if object.is_some() { "object" } else { "scalar" },
            typ: var.typ(),
            normalized_type: match object {
                Some(obj) => obj.php_type().to_string(),
                None => var.normalized_type().as_str().to_string(),
            },
            description: var.description(),
            required: field.is_required(),
            length: var.length(),
            since: var.since(),
            related: var.related(),
            date: var.is_date(),
            collection: var.is_collection(),
            php_type_tag: php_type_tag(field, registry),
            php_type_hint: php_type_hint(field, registry, false, false),
            swagger_name: determine_swagger_name(field, registry),
            class_name: object.map(ObjectVariable::class_name),
        })
    }
}
