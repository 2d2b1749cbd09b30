//! Generator configuration.
//!
//! Configuration is loaded from YAML and validated in full before any schema
//! is compiled. Anything invalid here is fatal; nothing downstream re-checks it.

mod overload;

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::diagnostic::GeneratorError;

pub use overload::{OverloadTable, OverloadedClass};

/// Swagger/OpenAPI annotation version emitted by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SwaggerVersion {
    #[default]
    V2,
    V3,
}

impl SwaggerVersion {
    /// Parse a configured version number.
    pub fn from_number(version: i64) -> Result<Self, GeneratorError> {
        match version {
            2 => Ok(SwaggerVersion::V2),
            3 => Ok(SwaggerVersion::V3),
            other => Err(GeneratorError::UnsupportedSwaggerVersion { version: other }),
        }
    }

    /// Numeric form, as written in the configuration file.
    pub fn as_number(&self) -> i64 {
        match self {
            SwaggerVersion::V2 => 2,
            SwaggerVersion::V3 => 3,
        }
    }
}

/// Validated configuration for a generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratorConfig {
    /// Root namespace of the generated client, without surrounding `\`.
    pub namespace: String,

    /// Swagger annotation version.
    pub swagger_version: SwaggerVersion,

    /// Class overloads keyed by derived class name.
    pub overloads: OverloadTable,
}

/// On-disk shape of the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    namespace: String,
    swagger: SwaggerSection,
    overloads: Vec<OverloadEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SwaggerSection {
    version: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverloadEntry {
    name: String,
    overload: String,
    #[serde(default)]
    swagger: Option<String>,
}

impl GeneratorConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            GeneratorError::ConfigParse { message, .. } => GeneratorError::ConfigParse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self, GeneratorError> {
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| GeneratorError::ConfigParse {
                path: "<inline>".into(),
                message: e.to_string(),
            })?
        };

        let swagger_version = match file.swagger.version {
            Some(version) => SwaggerVersion::from_number(version)?,
            None => SwaggerVersion::default(),
        };

        let mut overloads = OverloadTable::default();
        for entry in file.overloads {
            overloads.insert(OverloadedClass::new(entry.name, entry.overload, entry.swagger)?)?;
        }

        Ok(Self {
            namespace: normalize_namespace(&file.namespace),
            swagger_version,
            overloads,
        })
    }
}

fn normalize_namespace(namespace: &str) -> String {
    namespace.trim().trim_matches('\\').to_string()
}
