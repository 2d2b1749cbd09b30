//! Rendering of the compiled model into output files.
//!
//! Renderers receive the finished model plus the helper functions in
//! [`helpers`], and return file contents. Writing to disk is left to the
//! [`Generator`](crate::Generator).

pub mod helpers;
mod manifest;

use crate::compile::CompiledModel;
use crate::config::GeneratorConfig;
use crate::diagnostic::GeneratorError;
use crate::source::Capabilities;

pub use manifest::{ManifestRenderer, MANIFEST_FILE};

/// Generated output.
#[derive(Debug, Default)]
pub struct GeneratedCode {
    /// Map of relative filename to content.
    pub files: Vec<(String, String)>,
}

/// Everything a renderer may read.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub model: &'a CompiledModel,
    pub capabilities: &'a Capabilities,
    pub config: &'a GeneratorConfig,
}

/// Turns a compiled model into files.
pub trait Renderer {
    /// Returns the renderer name for logs.
    fn name(&self) -> &str;

    /// Renders the model.
    fn render(&self, ctx: &RenderContext<'_>) -> Result<GeneratedCode, GeneratorError>;
}
