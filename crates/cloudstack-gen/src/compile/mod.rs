//! Schema compiler: raw API records to the typed object model.
//!
//! The compiler walks each raw record once:
//! 1. Request parameters become scalar [`Variable`]s, sorted by name
//! 2. Response fields become scalars or references to shared objects
//! 3. Shared objects are created on first sight and extended on every
//!    later sight, so each ends up with the union of all observed fields
//! 4. Async APIs get their event type from the event map
//!
//! Malformed field records are skipped silently. A missing event type is a
//! warning. Nothing in here fails.

mod registry;

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::diagnostic::CompileWarning;
use crate::model::{
    natural_cmp, split_related, Api, Field, ObjectVariable, SharedObjectKey, Variable,
    DEFAULT_SINCE, PAGE_PARAM, PAGE_SIZE_PARAM,
};
use crate::source::{EventMap, RawApi, RawField};

pub use registry::SharedObjectRegistry;

/// Default description of the `pagesize` parameter.
pub const PAGE_SIZE_DESCRIPTION: &str = "the number of entries per page";

/// Default description of the `page` parameter.
pub const PAGE_DESCRIPTION: &str = "the page number of the result set";

/// The finished model handed to renderers.
#[derive(Debug, Clone, Default)]
pub struct CompiledModel {
    /// APIs in natural name order.
    pub apis: Vec<Api>,
    /// Shared response objects in ascending name order.
    pub shared_objects: SharedObjectRegistry,
    /// Non-fatal problems seen while compiling.
    pub warnings: Vec<CompileWarning>,
}

impl CompiledModel {
    /// Exact, case-sensitive lookup of an API by name.
    pub fn api(&self, name: &str) -> Option<&Api> {
        self.apis.iter().find(|api| api.name == name)
    }

    /// Resolve a shared object reference.
    pub fn resolve(&self, key: &SharedObjectKey) -> Option<&ObjectVariable> {
        self.shared_objects.get(key)
    }
}

/// Build a request parameter or response field from a raw record.
///
/// Returns `None` for records without a usable name.
pub fn compile_parameter(in_response: bool, raw: &RawField) -> Option<Variable> {
    let name = raw.trimmed_name()?;

    let mut var = Variable::new(in_response, name);
    if let Some(typ) = &raw.typ {
        var.set_type(typ.trim());
    }
    if let Some(description) = &raw.description {
        var.set_description(description.trim());
    }
    if let Some(required) = raw.required {
        var.set_required(required);
    }
    if let Some(length) = raw.length {
        var.set_length(length);
    }
    if let Some(since) = &raw.since {
        var.set_since(since.trim());
    }
    if let Some(related) = &raw.related {
        var.set_related_str(related);
    }

    if var.description().is_empty() {
        match var.name() {
            PAGE_SIZE_PARAM => var.set_description(PAGE_SIZE_DESCRIPTION),
            PAGE_PARAM => var.set_description(PAGE_DESCRIPTION),
            _ => {}
        }
    }

    Some(var)
}

/// Builds the object model from raw API records.
pub struct SchemaCompiler<'a> {
    config: &'a GeneratorConfig,
    event_map: &'a EventMap,
    apis: BTreeMap<String, Api>,
    shared_objects: SharedObjectRegistry,
    warnings: Vec<CompileWarning>,
}

impl<'a> SchemaCompiler<'a> {
    pub fn new(config: &'a GeneratorConfig, event_map: &'a EventMap) -> Self {
        Self {
            config,
            event_map,
            apis: BTreeMap::new(),
            shared_objects: SharedObjectRegistry::default(),
            warnings: Vec::new(),
        }
    }

    /// Compile every record and finish the model.
    pub fn compile_all(mut self, raw_apis: &[RawApi]) -> CompiledModel {
        for raw in raw_apis {
            self.add_api(raw);
        }
        self.finish()
    }

    /// Compile one record and store it under its name.
    ///
    /// A later record with the same name replaces the earlier one.
    pub fn add_api(&mut self, raw: &RawApi) {
        if let Some(api) = self.compile_api(raw) {
            self.apis.insert(api.name.clone(), api);
        }
    }

    /// Build a response field; records with nested fields reference a shared object.
    pub fn compile_response_field(&mut self, raw: &RawField) -> Option<Field> {
        match &raw.response {
            Some(nested) => {
                let name = raw.trimmed_name()?;
                let key = self.resolve_shared_object(name, raw.typ.as_deref(), nested);
                Some(Field::Object(key))
            }
            None => compile_parameter(true, raw).map(Field::Scalar),
        }
    }

    /// Create or extend the shared object `name` with `fields`.
    ///
    /// Fields whose name already exists on the object are left untouched, so
    /// the first definition seen wins.
    pub fn resolve_shared_object(
        &mut self,
        name: &str,
        raw_type: Option<&str>,
        fields: &[RawField],
    ) -> SharedObjectKey {
        let namespace = self.config.namespace.as_str();
        let overloads = &self.config.overloads;

        let (object, created) = self.shared_objects.get_or_insert_with(name, || {
            let mut obj = ObjectVariable::new(true, name, namespace, true, overloads);
            let var = obj.variable_mut();
            var.set_type(raw_type.map(str::trim).unwrap_or_default());
            let typ = var.typ().to_string();
            var.set_description(typ);
            obj
        });

        if created {
            debug!(object = name, class = object.class_name(), "registered shared object");
        }

        let mut added = 0usize;
        for raw in fields {
            if let Some(var) = compile_parameter(true, raw) {
                if object.properties_mut().insert_if_absent(var) {
                    added += 1;
                }
            }
        }

        if !created && added > 0 {
            debug!(object = name, added, "merged fields into shared object");
        }

        SharedObjectKey::new(name)
    }

    /// Build an [`Api`] from a raw record. Returns `None` for a blank name.
    pub fn compile_api(&mut self, raw: &RawApi) -> Option<Api> {
        let name = raw.trimmed_name()?;

        debug!(api = name, params = raw.params.len(), fields = raw.response.len(), "compiling API");

        let description = raw.description.as_deref().unwrap_or_default().trim().to_string();
        let since = raw.since.as_deref().map_or(DEFAULT_SINCE, str::trim).to_string();
        let related = raw.related.as_deref().map(split_related).unwrap_or_default();

        let mut response = ObjectVariable::new(
            true,
            name,
            self.config.namespace.as_str(),
            false,
            &self.config.overloads,
        );
        {
            let var = response.variable_mut();
            var.set_description(description.clone());
            var.set_since(since.clone());
            var.set_related(related.clone());
        }
        for prop in &raw.response {
            if let Some(field) = self.compile_response_field(prop) {
                response.properties_mut().insert_if_absent(field);
            }
        }
        response.properties_mut().name_sort();

        let mut api = Api::new(name, response);
        api.description = description;
        api.since = since;
        api.related = related;
        api.is_async = raw.isasync.unwrap_or(false);

        for param in &raw.params {
            if let Some(var) = compile_parameter(false, param) {
                api.parameters.insert_if_absent(var);
            }
        }
        api.parameters.name_sort();

        if api.is_async {
            match self.event_map.get(name) {
                Some(event) => api.event_type = Some(event.to_string()),
                None => {
                    let warning = CompileWarning::MissingAsyncEvent { api: name.to_string() };
                    warn!("{}", warning);
                    self.warnings.push(warning);
                }
            }
        }

        Some(api)
    }

    /// Sort shared object properties and hand out the model.
    pub fn finish(mut self) -> CompiledModel {
        for object in self.shared_objects.iter_mut() {
            object.properties_mut().name_sort();
        }

        info!(
            apis = self.apis.len(),
            shared_objects = self.shared_objects.len(),
            warnings = self.warnings.len(),
            "schema compiled"
        );

        let mut apis: Vec<Api> = self.apis.into_values().collect();
        apis.sort_by(|a, b| natural_cmp(&a.name, &b.name));

        CompiledModel {
            apis,
            shared_objects: self.shared_objects,
            warnings: self.warnings,
        }
    }
}
