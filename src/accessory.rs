//! In-memory registry of tracked accessories.
//!
//! Persistence is deliberately out of scope; the roster exists so callers
//! can guard the "at least one accessory registered" precondition on
//! report refreshes.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Identifier of a registered accessory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessoryId(String);

impl AccessoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tracked accessory known to this companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessory {
    pub id: AccessoryId,
    pub name: String,
}

impl Accessory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AccessoryId::new(id),
            name: name.into(),
        }
    }
}

/// Shared, in-memory collection of registered accessories.
///
/// Cheap to clone; clones share the collection.
#[derive(Debug, Clone, Default)]
pub struct AccessoryRoster {
    inner: Arc<RwLock<Vec<Accessory>>>,
}

impl AccessoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accessory; re-registering an id replaces the entry.
    pub fn register(&self, accessory: Accessory) {
        let mut entries = self.inner.write().unwrap();
        entries.retain(|a| a.id != accessory.id);
        entries.push(accessory);
    }

    /// Remove by id; returns whether an entry was present.
    pub fn remove(&self, id: &AccessoryId) -> bool {
        let mut entries = self.inner.write().unwrap();
        let before = entries.len();
        entries.retain(|a| &a.id != id);
        entries.len() != before
    }

    pub fn get(&self, id: &AccessoryId) -> Option<Accessory> {
        self.inner.read().unwrap().iter().find(|a| &a.id == id).cloned()
    }

    pub fn all(&self) -> Vec<Accessory> {
        self.inner.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }
}
