//! JSON object helpers over any [`ObjectStore`].

use docindex_common::{Result, error::Error};
use serde::{Serialize, de::DeserializeOwned};

use crate::ObjectStore;

/// Reads and deserializes the JSON object stored under `key`.
///
/// A missing key surfaces as `NotFound`; malformed content as `InvalidFormat`.
pub fn get_json<T: DeserializeOwned>(store: &dyn ObjectStore, key: &str) -> Result<T> {
    let bytes = store.get(key)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::invalid_format_msg(key, format!("malformed JSON: {e}")))
}

/// Reads the JSON object stored under `key`, mapping `NotFound` to `None`.
pub fn try_get_json<T: DeserializeOwned>(store: &dyn ObjectStore, key: &str) -> Result<Option<T>> {
    match get_json(store, key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Serializes `value` as compact JSON and writes it under `key`.
pub fn put_json<T: Serialize + ?Sized>(store: &dyn ObjectStore, key: &str, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec(value).map_err(|e| Error::json(key, e))?;
    store.put(key, &bytes)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::memory_store::MemoryObjectStore;

    #[test]
    fn test_json_helpers() {
        let store = MemoryObjectStore::new();
        let value = json!({"configs": [{"name": "movies"}]});
        put_json(&store, "search_config.json", &value).unwrap();

        let loaded: serde_json::Value = get_json(&store, "search_config.json").unwrap();
        assert_eq!(loaded, value);

        let missing: Option<serde_json::Value> = try_get_json(&store, "absent.json").unwrap();
        assert!(missing.is_none());
        assert!(get_json::<serde_json::Value>(&store, "absent.json")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_malformed_json_is_format_error() {
        let store = MemoryObjectStore::new();
        store.put("articles/broken.json", b"{not json").unwrap();
        let err = get_json::<serde_json::Value>(&store, "articles/broken.json").unwrap_err();
        assert!(matches!(
            err.kind(),
            docindex_common::error::ErrorKind::InvalidFormat { .. }
        ));
    }
}
