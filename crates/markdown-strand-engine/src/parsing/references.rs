//! # Reference Definitions
//!
//! Storage for `[key]: value` definitions. The engine lowercases keys before
//! calling into the store, so implementations can compare them verbatim.

use std::collections::HashMap;

/// Where reference definitions are collected and looked up.
///
/// Implement this to share definitions across documents; the engine only
/// needs insert-if-absent and lookup.
pub trait ReferenceStore {
    /// Inserts `value` under `key` unless the key already exists.
    ///
    /// Returns true when the value was inserted.
    fn insert_if_absent(&mut self, key: String, value: String) -> bool;

    fn lookup(&self, key: &str) -> Option<&str>;
}

/// The default in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryReferenceStore {
    entries: HashMap<String, String>,
}

impl MemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReferenceStore for MemoryReferenceStore {
    fn insert_if_absent(&mut self, key: String, value: String) -> bool {
        match self.entries.entry(key) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

/// Normalizes a reference label for storage and lookup.
pub fn reference_key(label: &str) -> String {
    label.to_lowercase()
}
