//! Schema sources for reading the raw API description.
//!
//! Each source is responsible for producing:
//! 1. The raw `listApis` records
//! 2. The instance capabilities (used only for output metadata)
//!
//! Transport, authentication and request signing live outside this crate;
//! a source only sees documents that were already fetched.

mod event_map;
mod raw;

use std::path::{Path, PathBuf};
use serde_json::Value;

use crate::diagnostic::GeneratorError;

pub use event_map::EventMap;
pub use raw::{Capabilities, RawApi, RawField};

/// Trait for schema sources.
pub trait SchemaSource {
    /// Returns a human-readable source name for logs.
    fn name(&self) -> &str;

    /// Returns the raw API records, in source order.
    fn apis(&self) -> Result<Vec<RawApi>, GeneratorError>;

    /// Returns the instance capabilities.
    fn capabilities(&self) -> Result<Capabilities, GeneratorError>;
}

/// Reads `listApis` and `listCapabilities` output from JSON files.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    apis_path: PathBuf,
    capabilities_path: Option<PathBuf>,
}

impl FileSource {
    pub fn new(apis_path: impl Into<PathBuf>, capabilities_path: Option<PathBuf>) -> Self {
        let apis_path = apis_path.into();
        Self {
            name: apis_path.display().to_string(),
            apis_path,
            capabilities_path,
        }
    }
}

impl SchemaSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn apis(&self) -> Result<Vec<RawApi>, GeneratorError> {
        let value = read_json(&self.apis_path)?;
        parse_api_list(&self.name, value)
    }

    fn capabilities(&self) -> Result<Capabilities, GeneratorError> {
        match &self.capabilities_path {
            Some(path) => parse_capabilities(&path.display().to_string(), read_json(path)?),
            None => Ok(Capabilities::default()),
        }
    }
}

/// An in-memory source over documents fetched elsewhere.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    apis: Value,
    capabilities: Value,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, apis: Value, capabilities: Value) -> Self {
        Self {
            name: name.into(),
            apis,
            capabilities,
        }
    }
}

impl SchemaSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn apis(&self) -> Result<Vec<RawApi>, GeneratorError> {
        parse_api_list(&self.name, self.apis.clone())
    }

    fn capabilities(&self) -> Result<Capabilities, GeneratorError> {
        parse_capabilities(&self.name, self.capabilities.clone())
    }
}

/// Parse `listApis` output, wrapped in `listapisresponse` or bare.
pub fn parse_api_list(source_name: &str, value: Value) -> Result<Vec<RawApi>, GeneratorError> {
    let list = match value {
        Value::Object(mut map) => match map.remove("listapisresponse") {
            Some(Value::Object(mut inner)) => inner.remove("api").unwrap_or(Value::Array(Vec::new())),
            Some(other) => other,
            None => match map.remove("api") {
                Some(list) => list,
                None => Value::Object(map),
            },
        },
        other => other,
    };

    let Value::Array(entries) = list else {
        return Err(GeneratorError::schema(source_name, "expected an array of API records"));
    };

    // Malformed entries become blank records; the compiler skips them.
    Ok(entries.into_iter().map(RawApi::from_value_lenient).collect())
}

/// Parse `listCapabilities` output, wrapped or bare.
pub fn parse_capabilities(source_name: &str, value: Value) -> Result<Capabilities, GeneratorError> {
    let capability = match value {
        Value::Object(mut map) => match map.remove("listcapabilitiesresponse") {
            Some(Value::Object(mut inner)) => inner.remove("capability").unwrap_or(Value::Null),
            Some(other) => other,
            None => match map.remove("capability") {
                Some(capability) => capability,
                None => Value::Object(map),
            },
        },
        Value::Null => return Ok(Capabilities::default()),
        other => other,
    };

    if capability.is_null() {
        return Ok(Capabilities::default());
    }

    serde_json::from_value(capability).map_err(|e| GeneratorError::schema(source_name, e.to_string()))
}

fn read_json(path: &Path) -> Result<Value, GeneratorError> {
    let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content)
        .map_err(|e| GeneratorError::schema(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_api_list() {
        let apis = parse_api_list(
            "test",
            json!({"listapisresponse": {"count": 1, "api": [{"name": "listZones"}]}}),
        )
        .unwrap();
        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].trimmed_name(), Some("listZones"));
    }

    #[test]
    fn test_bare_api_list() {
        let apis = parse_api_list("test", json!([{"name": "a"}, {"name": "b"}])).unwrap();
        assert_eq!(apis.len(), 2);
    }

    #[test]
    fn test_malformed_api_entries_become_blank_records() {
        let apis = parse_api_list(
            "test",
            json!([null, {"name": null}, "listHosts", {"name": "listZones", "params": 7}, {"name": 42}]),
        )
        .unwrap();

        let names: Vec<Option<&str>> = apis.iter().map(RawApi::trimmed_name).collect();
        assert_eq!(names, [None, None, None, Some("listZones"), Some("42")]);
        assert!(apis[3].params.is_empty());
    }

    #[test]
    fn test_api_list_must_be_array() {
        let err = parse_api_list("test", json!({"nope": true})).unwrap_err();
        assert!(matches!(err, GeneratorError::SchemaParse { .. }));
    }

    #[test]
    fn test_capabilities_forms() {
        let wrapped = parse_capabilities(
            "test",
            json!({"listcapabilitiesresponse": {"capability": {"cloudstackversion": "4.11.2.0"}}}),
        )
        .unwrap();
        assert_eq!(wrapped.version(), "4.11.2.0");

        let bare = parse_capabilities("test", json!({"cloudstackversion": "4.9"})).unwrap();
        assert_eq!(bare.version(), "4.9");

        let missing = parse_capabilities("test", Value::Null).unwrap();
        assert_eq!(missing.version(), "unknown");
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let apis_path = dir.path().join("apis.json");
        std::fs::write(&apis_path, r#"{"listapisresponse":{"api":[{"name":"listHosts"}]}}"#).unwrap();

        let source = FileSource::new(&apis_path, None);
        assert_eq!(source.apis().unwrap()[0].trimmed_name(), Some("listHosts"));
        assert_eq!(source.capabilities().unwrap().version(), "unknown");
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/apis.json", None);
        assert!(matches!(source.apis().unwrap_err(), GeneratorError::IoError { .. }));
    }
}
