//! # CloudStack Client Generator
//!
//! This crate compiles the self-describing API listing of an Apache
//! CloudStack instance into a typed object model, and hands that model to
//! renderers that produce client code.
//!
//! ## Architecture
//!
//! ```text
//! listApis / listCapabilities JSON
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Source    │  Lenient parsing into raw records
//! │ (JSON → Raw) │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Compile    │  Variables, shared objects, overloads,
//! │(Raw → Model) │  async event types
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Render    │  Manifest or client templates
//! │(Model → Out) │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cloudstack_gen::{EventMap, FileSource, Generator, GeneratorConfig, ManifestRenderer};
//!
//! let config = GeneratorConfig::load("generator.yml".as_ref())?;
//! let source = FileSource::new("apis.json", Some("capabilities.json".into()));
//!
//! let generator = Generator::new(config);
//! let result = generator.generate(&source, &EventMap::default(), &ManifestRenderer, "out".as_ref())?;
//! println!("{} APIs", result.apis);
//! ```

pub mod compile;
pub mod config;
pub mod diagnostic;
pub mod model;
pub mod render;
pub mod source;

use std::path::Path;
use tracing::info;

pub use compile::{CompiledModel, SchemaCompiler, SharedObjectRegistry};
pub use config::{GeneratorConfig, OverloadTable, OverloadedClass, SwaggerVersion};
pub use diagnostic::{CompileWarning, GeneratorError};
pub use model::{Api, Field, ObjectVariable, SharedObjectKey, Variable, VariableContainer};
pub use render::{GeneratedCode, ManifestRenderer, RenderContext, Renderer};
pub use source::{Capabilities, EventMap, FileSource, RawApi, RawField, SchemaSource, StaticSource};

/// The main generator struct that orchestrates the pipeline.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Reads the source and compiles it, without rendering anything.
    pub fn compile(
        &self,
        source: &dyn SchemaSource,
        event_map: &EventMap,
    ) -> Result<CompiledModel, GeneratorError> {
        let raw_apis = source.apis()?;
        info!(source = source.name(), records = raw_apis.len(), "read API records");

        Ok(SchemaCompiler::new(&self.config, event_map).compile_all(&raw_apis))
    }

    /// Runs the full pipeline.
    ///
    /// 1. Read capabilities and API records from the source
    /// 2. Compile the records into the object model
    /// 3. Render the model
    /// 4. Write rendered files under `out_dir`
    pub fn generate(
        &self,
        source: &dyn SchemaSource,
        event_map: &EventMap,
        renderer: &dyn Renderer,
        out_dir: &Path,
    ) -> Result<GenerateResult, GeneratorError> {
        // Phase 1: Capabilities (metadata only)
        let capabilities = source.capabilities()?;
        info!(version = capabilities.version(), "read capabilities");

        // Phase 2: Compile
        let model = self.compile(source, event_map)?;

        // Phase 3: Render
        let ctx = RenderContext {
            model: &model,
            capabilities: &capabilities,
            config: &self.config,
        };
        let generated = renderer.render(&ctx)?;
        info!(renderer = renderer.name(), files = generated.files.len(), "rendered output");

        // Phase 4: Write output
        write_output(out_dir, &generated)?;

        Ok(GenerateResult {
            apis: model.apis.len(),
            shared_objects: model.shared_objects.len(),
            files: generated.files.iter().map(|(name, _)| name.clone()).collect(),
            warnings: model.warnings,
        })
    }
}

/// Writes generated files under `out_dir`, creating directories as needed.
pub fn write_output(out_dir: &Path, generated: &GeneratedCode) -> Result<(), GeneratorError> {
    std::fs::create_dir_all(out_dir).map_err(|e| GeneratorError::io(out_dir, e.to_string()))?;

    for (filename, content) in &generated.files {
        let path = out_dir.join(filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e.to_string()))?;
        }
        std::fs::write(&path, content).map_err(|e| GeneratorError::IoError {
            path,
            message: e.to_string(),
        })?;
    }

    Ok(())
}

/// Result of a successful generation.
#[derive(Debug)]
pub struct GenerateResult {
    /// Number of APIs compiled.
    pub apis: usize,
    /// Number of shared response objects.
    pub shared_objects: usize,
    /// Non-fatal problems found while compiling.
    pub warnings: Vec<CompileWarning>,
    /// Relative names of the files written.
    pub files: Vec<String>,
}
