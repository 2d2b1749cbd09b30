//! Process-wide store of shared response objects.

use std::collections::btree_map::{self, BTreeMap};
use serde::Serialize;

use crate::model::{ObjectVariable, SharedObjectKey};

/// Owns every shared object by value, keyed by object name.
///
/// Response trees hold [`SharedObjectKey`]s into this registry. All merges of
/// newly observed fields go through it, so there is exactly one definition
/// per shared type.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SharedObjectRegistry {
    objects: BTreeMap<String, ObjectVariable>,
}

impl SharedObjectRegistry {
    pub fn get(&self, key: &SharedObjectKey) -> Option<&ObjectVariable> {
        self.objects.get(key.as_str())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&ObjectVariable> {
        self.objects.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Existing object for `name`, or the one built by `create`.
    ///
    /// Returns whether the object was newly created.
    pub(crate) fn get_or_insert_with(
        &mut self,
        name: &str,
        create: impl FnOnce() -> ObjectVariable,
    ) -> (&mut ObjectVariable, bool) {
        match self.objects.entry(name.to_string()) {
            btree_map::Entry::Occupied(entry) => (entry.into_mut(), false),
            btree_map::Entry::Vacant(entry) => (entry.insert(create()), true),
        }
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ObjectVariable> {
        self.objects.values_mut()
    }

    /// Objects in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectVariable)> {
        self.objects.iter().map(|(name, obj)| (name.as_str(), obj))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
