//! Index registry.
//!
//! Holds the indexes a process serves, keyed by name. The request layer looks
//! the target index up here before any document is decoded.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::interfaces::DocumentIndex;

/// Concurrent name → index map.
#[derive(Default)]
pub struct IndexRegistry {
    indexes: RwLock<HashMap<String, Arc<dyn DocumentIndex>>>,
}

impl IndexRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an index under its own name, replacing any previous index
    /// with that name. Returns the replaced index.
    pub fn register(&self, index: Arc<dyn DocumentIndex>) -> Option<Arc<dyn DocumentIndex>> {
        let name = index.name().to_string();
        info!(index = %name, "Registering index");
        self.write().insert(name, index)
    }

    /// Look an index up by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn DocumentIndex>> {
        self.read().get(name).cloned()
    }

    /// Remove an index by name.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn DocumentIndex>> {
        self.write().remove(name)
    }

    /// Names of all registered indexes, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<dyn DocumentIndex>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.indexes.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<dyn DocumentIndex>>> {
        self.indexes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryIndex;

    #[test]
    fn test_register_and_get() {
        let registry = IndexRegistry::new();
        registry.register(Arc::new(MemoryIndex::new("docs")));

        let index = registry.get("docs").unwrap();

        assert_eq!(index.name(), "docs");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let registry = IndexRegistry::new();
        assert!(registry.register(Arc::new(MemoryIndex::new("docs"))).is_none());
        assert!(registry.register(Arc::new(MemoryIndex::new("docs"))).is_some());
        assert_eq!(registry.names(), vec!["docs"]);
    }

    #[test]
    fn test_remove_and_names() {
        let registry = IndexRegistry::new();
        registry.register(Arc::new(MemoryIndex::new("b")));
        registry.register(Arc::new(MemoryIndex::new("a")));

        assert_eq!(registry.names(), vec!["a", "b"]);

        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert_eq!(registry.names(), vec!["b"]);
    }
}
