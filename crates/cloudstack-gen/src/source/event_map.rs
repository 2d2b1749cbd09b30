//! Lookup of async API names to their CloudStack event type.

use std::collections::BTreeMap;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::diagnostic::GeneratorError;

/// `{api name -> event type}` table, e.g. `deployVirtualMachine -> VM.CREATE`.
///
/// The table is produced outside this crate. Missing entries are expected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventMap {
    events: BTreeMap<String, String>,
}

impl EventMap {
    /// Load a JSON object file of `"apiName": "EVENT.TYPE"` entries.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content)
            .map_err(|e| GeneratorError::schema(path.display().to_string(), e.to_string()))
    }

    pub fn get(&self, api_name: &str) -> Option<&str> {
        self.events.get(api_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EventMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, r#"{"deployVirtualMachine": "VM.CREATE"}"#).unwrap();

        let map = EventMap::load(&path).unwrap();
        assert_eq!(map.get("deployVirtualMachine"), Some("VM.CREATE"));
        assert_eq!(map.get("destroyVirtualMachine"), None);
    }

    #[test]
    fn test_from_iter() {
        let map: EventMap = [("a", "A.EVENT")].into_iter().collect();
        assert_eq!(map.len(), 1);
    }
}
