//! *Object Store* abstraction: a flat key/value "storage service" with
//! hierarchical `/`-separated keys, as consumed by the indexing pipeline and the
//! query engine.
//!
//! The store is assumed to provide reliable primitives; transient failures are
//! retried (if at all) inside an implementation, and anything that escapes it is
//! treated as a terminal failure of the current operation.

pub mod json;
pub mod key;
pub mod local_store;
pub mod memory_store;

use docindex_common::Result;

/// Default number of keys returned by a single listing page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// One page of a key listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Keys of this page, in ascending lexicographic order.
    pub keys: Vec<String>,
    /// When set, more keys exist and the next page starts strictly after this key.
    pub next_start_after: Option<String>,
}

/// The `ObjectStore` trait represents a "storage service" abstraction.
///
/// Keys are compared as plain byte strings. Listings are always returned in
/// ascending key order, which the pipeline relies upon for a stable corpus order.
pub trait ObjectStore: Send + Sync + 'static {
    /// Lists at most `max_keys` keys starting with `prefix` that sort strictly
    /// after `start_after`.
    fn list_page(
        &self,
        prefix: &str,
        start_after: Option<&str>,
        max_keys: usize,
    ) -> Result<ListPage>;

    /// Reads the whole object. Returns a `NotFound` error for a missing key.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Writes (or replaces) the object under `key`.
    fn put(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Removes the object under `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Lists all keys starting with `prefix`, paging through the store transparently.
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut start_after: Option<String> = None;
        loop {
            let page = self.list_page(prefix, start_after.as_deref(), DEFAULT_PAGE_SIZE)?;
            keys.extend(page.keys);
            match page.next_start_after {
                Some(next) => start_after = Some(next),
                None => return Ok(keys),
            }
        }
    }
}

/// Cuts an ordered, prefix-filtered key sequence into one page.
///
/// Shared by the in-process store implementations.
pub(crate) fn paginate<'k>(
    keys: impl Iterator<Item = &'k str>,
    start_after: Option<&str>,
    max_keys: usize,
) -> ListPage {
    let max_keys = max_keys.max(1);
    let mut page_keys = Vec::new();
    let mut truncated = false;
    for key in keys.filter(|k| start_after.is_none_or(|after| *k > after)) {
        if page_keys.len() == max_keys {
            truncated = true;
            break;
        }
        page_keys.push(key.to_string());
    }
    let next_start_after = if truncated { page_keys.last().cloned() } else { None };
    ListPage {
        keys: page_keys,
        next_start_after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryObjectStore;

    fn populated(count: usize) -> MemoryObjectStore {
        let store = MemoryObjectStore::new();
        for i in 0..count {
            store.put(&format!("articles/{i:05}.json"), b"{}").unwrap();
        }
        store.put("search_config.json", b"{}").unwrap();
        store
    }

    #[test]
    fn test_list_pages_through_everything() {
        let store = populated(DEFAULT_PAGE_SIZE * 2 + 17);
        let keys = store.list("articles/").unwrap();
        assert_eq!(keys.len(), DEFAULT_PAGE_SIZE * 2 + 17);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert!(keys.iter().all(|k| k.starts_with("articles/")));
    }

    #[test]
    fn test_paginate() {
        let keys = ["a/1", "a/2", "a/3"];
        let page = paginate(keys.iter().copied(), None, 2);
        assert_eq!(page.keys, vec!["a/1", "a/2"]);
        assert_eq!(page.next_start_after.as_deref(), Some("a/2"));

        let page = paginate(keys.iter().copied(), Some("a/2"), 2);
        assert_eq!(page.keys, vec!["a/3"]);
        assert!(page.next_start_after.is_none());

        let page = paginate(keys.iter().copied(), None, 3);
        assert_eq!(page.keys.len(), 3);
        assert!(page.next_start_after.is_none());
    }
}
