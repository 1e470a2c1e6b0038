//! Registry capability and an in-memory registry
//!
//! The engine owns the real registries; content code only needs to put a value
//! under a namespaced key. [`ContentRegistry`] captures that capability and
//! [`MemoryRegistry`] implements it for tooling and tests.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite `namespace:path` key used by registries
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    namespace: String,
    path: String,
}

impl ResourceKey {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Key-value store content is registered into
///
/// Implementations decide how to treat duplicate keys or writes in an invalid
/// state and report it through their own error type.
pub trait ContentRegistry<T> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `value` under `key`, returning the value on success
    fn put(&mut self, key: ResourceKey, value: T) -> Result<T, Self::Error>;
}

impl<T, R: ContentRegistry<T> + ?Sized> ContentRegistry<T> for &mut R {
    type Error = R::Error;

    fn put(&mut self, key: ResourceKey, value: T) -> Result<T, Self::Error> {
        (**self).put(key, value)
    }
}

/// Error type for [`MemoryRegistry`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate registration for '{key}'")]
    Duplicate { key: ResourceKey },
    #[error("Registry is frozen, cannot register '{key}'")]
    Frozen { key: ResourceKey },
}

/// Ordered in-memory registry
///
/// Rejects duplicate keys and, once frozen, any further writes. Values are
/// cloned on `put` so the caller gets its value back; use a shared handle such
/// as `Arc<T>` to keep a single instance.
#[derive(Debug, Clone)]
pub struct MemoryRegistry<T> {
    name: String,
    entries: BTreeMap<ResourceKey, T>,
    frozen: bool,
}

impl<T> MemoryRegistry<T> {
    /// Create an empty registry
    ///
    /// # Arguments
    ///
    /// * `name` - Registry name used in diagnostics (e.g., "item")
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
            frozen: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a registered value
    pub fn get(&self, key: &ResourceKey) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &ResourceKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKey, &T)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject all further registrations
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

impl<T: Clone> ContentRegistry<T> for MemoryRegistry<T> {
    type Error = RegistryError;

    fn put(&mut self, key: ResourceKey, value: T) -> Result<T, Self::Error> {
        if self.frozen {
            return Err(RegistryError::Frozen { key });
        }
        if self.entries.contains_key(&key) {
            return Err(RegistryError::Duplicate { key });
        }
        self.entries.insert(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key(path: &str) -> ResourceKey {
        ResourceKey::new("vault", path)
    }

    #[test]
    fn test_resource_key_display() {
        let key = key("ruby_gem");
        assert_eq!(key.to_string(), "vault:ruby_gem");
        assert_eq!(key.namespace(), "vault");
        assert_eq!(key.path(), "ruby_gem");
    }

    #[test]
    fn test_put_and_get() {
        let mut registry = MemoryRegistry::new("item");

        let returned = registry.put(key("ruby_gem"), 7u32).unwrap();

        assert_eq!(returned, 7);
        assert_eq!(registry.get(&key("ruby_gem")), Some(&7));
        assert!(registry.contains(&key("ruby_gem")));
        assert!(!registry.contains(&key("emerald")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_put_returns_same_instance() {
        let mut registry = MemoryRegistry::new("item");
        let value = Arc::new("ruby".to_string());

        let returned = registry.put(key("ruby_gem"), Arc::clone(&value)).unwrap();

        assert!(Arc::ptr_eq(&value, &returned));
        assert!(Arc::ptr_eq(&value, registry.get(&key("ruby_gem")).unwrap()));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut registry = MemoryRegistry::new("item");
        registry.put(key("ruby_gem"), 1u32).unwrap();

        let err = registry.put(key("ruby_gem"), 2u32).unwrap_err();

        assert_eq!(err, RegistryError::Duplicate { key: key("ruby_gem") });
        assert_eq!(err.to_string(), "Duplicate registration for 'vault:ruby_gem'");
        assert_eq!(registry.get(&key("ruby_gem")), Some(&1));
    }

    #[test]
    fn test_frozen_registry_rejects_writes() {
        let mut registry = MemoryRegistry::new("block");
        registry.put(key("ruby_block"), 1u32).unwrap();
        registry.freeze();

        let err = registry.put(key("ruby_ore"), 2u32).unwrap_err();

        assert!(registry.is_frozen());
        assert_eq!(err, RegistryError::Frozen { key: key("ruby_ore") });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_keys_are_sorted() {
        let mut registry = MemoryRegistry::new("item");
        registry.put(key("b"), 0u8).unwrap();
        registry.put(key("a"), 0u8).unwrap();
        registry.put(ResourceKey::new("alpha", "z"), 0u8).unwrap();

        let keys: Vec<String> = registry.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["alpha:z", "vault:a", "vault:b"]);
    }

    #[test]
    fn test_put_through_mut_reference() {
        fn put_one<R: ContentRegistry<u32>>(mut registry: R) -> Result<u32, R::Error> {
            registry.put(ResourceKey::new("vault", "one"), 1)
        }

        let mut registry = MemoryRegistry::new("item");
        assert_eq!(put_one(&mut registry).unwrap(), 1);
        assert_eq!(registry.len(), 1);
    }
}
