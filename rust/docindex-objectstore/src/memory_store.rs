//! In-memory object store backed by an ordered map.

use std::{
    collections::BTreeMap,
    ops::Bound,
    sync::{Arc, RwLock},
};

use docindex_common::{Result, error::Error};

use crate::{ListPage, ObjectStore, key::verify_key, paginate};

/// An `ObjectStore` that keeps all objects in process memory.
///
/// Used by tests and by embedders that want a throwaway corpus. Cloning the
/// store yields another handle to the same objects.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<BTreeMap<String, Arc<[u8]>>>>,
}

impl MemoryObjectStore {
    pub fn new() -> MemoryObjectStore {
        Default::default()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Arc<[u8]>>> {
        self.objects.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, Arc<[u8]>>> {
        self.objects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStore for MemoryObjectStore {
    fn list_page(
        &self,
        prefix: &str,
        start_after: Option<&str>,
        max_keys: usize,
    ) -> Result<ListPage> {
        let objects = self.read();
        let keys = objects
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(k, _)| k.as_str())
            .take_while(|k| k.starts_with(prefix));
        Ok(paginate(keys, start_after, max_keys))
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        verify_key(key)?;
        self.read()
            .get(key)
            .map(|data| data.to_vec())
            .ok_or_else(|| Error::not_found(key))
    }

    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        verify_key(key)?;
        self.write().insert(key.to_string(), Arc::from(data));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        verify_key(key)?;
        self.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryObjectStore::new();
        store.put("articles/1.json", b"{\"id\":1}").unwrap();
        assert_eq!(store.get("articles/1.json").unwrap(), b"{\"id\":1}");
        assert_eq!(store.len(), 1);

        store.put("articles/1.json", b"[]").unwrap();
        assert_eq!(store.get("articles/1.json").unwrap(), b"[]");

        store.delete("articles/1.json").unwrap();
        assert!(store.get("articles/1.json").unwrap_err().is_not_found());
        // deleting a missing key is fine
        store.delete("articles/1.json").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_listing_respects_prefix() {
        let store = MemoryObjectStore::new();
        for key in [
            "articles/2.json",
            "articles/1.json",
            "articles_all.json",
            "indexes/movies/shard-000000.json",
            "search_config.json",
        ] {
            store.put(key, b"{}").unwrap();
        }
        assert_eq!(
            store.list("articles/").unwrap(),
            vec!["articles/1.json", "articles/2.json"]
        );
        assert_eq!(store.list("indexes/movies/").unwrap().len(), 1);
        assert!(store.list("indexes/books/").unwrap().is_empty());
        assert_eq!(store.list("").unwrap().len(), 5);
    }

    #[test]
    fn test_memory_store_rejects_bad_keys() {
        let store = MemoryObjectStore::new();
        assert!(store.put("/abs.json", b"{}").is_err());
        assert!(store.get("a/../b").is_err());
    }
}
