//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while loading input, compiling or rendering.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(cloudstack_gen::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Failed to parse configuration '{}': {message}", path.display())]
    #[diagnostic(code(cloudstack_gen::config::parse_failed))]
    ConfigParse {
        path: PathBuf,
        message: String,
    },

    #[error("swagger.version accepts value of 2 or 3, {version} seen")]
    #[diagnostic(
        code(cloudstack_gen::config::unsupported_swagger_version),
        help("Set swagger.version to 2 or 3, or remove it to use the default of 2")
    )]
    UnsupportedSwaggerVersion {
        version: i64,
    },

    #[error("Invalid overload '{name}': {reason}")]
    #[diagnostic(
        code(cloudstack_gen::config::invalid_overload),
        help("Each overload needs a unique `name` (the generated class name) and a non-empty `overload` FQ name")
    )]
    InvalidOverload {
        name: String,
        reason: String,
    },

    // =========================================================================
    // Schema Errors
    // =========================================================================
    #[error("Failed to parse schema document '{source_name}': {message}")]
    #[diagnostic(
        code(cloudstack_gen::schema::parse_failed),
        help("Expected the JSON output of listApis / listCapabilities, either wrapped or bare")
    )]
    SchemaParse {
        source_name: String,
        message: String,
    },

    // =========================================================================
    // Render Errors
    // =========================================================================
    #[error("Failed to render output: {message}")]
    #[diagnostic(code(cloudstack_gen::render::render_failed))]
    RenderFailed {
        message: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a schema parse error.
    pub fn schema(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaParse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
