//! In-process key-value store.

use std::collections::BTreeMap;

use super::{check_quota, KeyValueStore};
use crate::error::Result;

/// A [`KeyValueStore`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store limited to `quota` bytes of keys and values.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    /// Total bytes held by the store.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let current = self.items.get(key).map_or(0, |v| key.len() + v.len());
        check_quota(key, value, self.used_bytes() - current, self.quota)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool> {
        Ok(self.items.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        assert!(store.remove_item("k").unwrap());
        assert!(store.get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_quota_replacing_counts_only_new_value() {
        let mut store = MemoryStore::with_quota(6);
        store.set_item("k", "12345").unwrap();
        store.set_item("k", "54321").unwrap();
        assert_eq!(store.used_bytes(), 6);

        let err = store.set_item("k", "123456").unwrap_err();
        assert!(matches!(err, Error::QuotaExceeded { required: 7, .. }));
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("54321"));
    }

    #[test]
    fn test_keys() {
        let mut store = MemoryStore::new();
        store.set_item("z", "1").unwrap();
        store.set_item("a", "2").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "z".to_string()]);
    }
}
