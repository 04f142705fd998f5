//! [`FakeRemoteStore`], an in-memory stand-in for the remote system.

use std::collections::HashMap;

use serde_json::Value;

/// Composite identifier for one configuration surface of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    /// The externally managed resource instance.
    pub resource: String,
    /// The configuration surface on that resource.
    pub surface: String,
}

impl StoreKey {
    pub fn new(resource: impl Into<String>, surface: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            surface: surface.into(),
        }
    }
}

/// In-memory fake of the remote system's configuration store.
///
/// Exposes the contract the engine expects of the real remote-state
/// fetcher: get/put/delete of a whole wire mapping by composite key.
/// No concurrency guarantees, nothing persisted.
#[derive(Debug, Clone, Default)]
pub struct FakeRemoteStore {
    objects: HashMap<StoreKey, Value>,
}

impl FakeRemoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapping currently reported for `key`, or `None` when the remote
    /// does not report this surface.
    pub fn get(&self, key: &StoreKey) -> Option<Value> {
        self.objects.get(key).cloned()
    }

    /// Replace the whole mapping reported for `key`.
    pub fn put(&mut self, key: StoreKey, mapping: Value) {
        self.objects.insert(key, mapping);
    }

    /// Stop reporting `key` entirely.
    pub fn delete(&mut self, key: &StoreKey) {
        self.objects.remove(key);
    }

    /// Number of stored surfaces.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Simulate an external edit: overwrite one entry inside the stored
    /// mapping, as an operator changing a setting in the remote console.
    ///
    /// # Panics
    /// Panics when nothing is stored under `key` or the stored value is not
    /// a mapping.
    pub fn set_entry(&mut self, key: &StoreKey, setting: &str, value: Value) {
        let mapping = self
            .objects
            .get_mut(key)
            .unwrap_or_else(|| panic!("FakeRemoteStore::set_entry: nothing stored for {:?}", key));
        let entries = mapping.as_object_mut().unwrap_or_else(|| {
            panic!("FakeRemoteStore::set_entry: surface for {:?} is not a mapping", key)
        });
        entries.insert(setting.to_string(), value);
    }
}
