//! Object key rules and the key namespaces used by the search pipeline.
//!
//! Keys are relative, `/`-separated paths. They must not start with a slash and
//! must not contain empty, `.` or `..` segments, so that every key maps to a
//! location inside the store container (this matters for the local filesystem
//! store, where keys become paths).

use docindex_common::{Result, error::Error};

/// Key of the search configuration document.
pub const CONFIG_KEY: &str = "search_config.json";

/// Namespace of pending (not yet indexed) document submissions.
pub const PENDING_PREFIX: &str = "articles/";

/// Key of the snapshot of the whole corpus written after each rebuild.
pub const CORPUS_SNAPSHOT_KEY: &str = "articles_all.json";

/// Root namespace of the index artifacts.
pub const INDEX_PREFIX: &str = "indexes/";

const SHARD_FILE_PREFIX: &str = "shard-";
const JSON_SUFFIX: &str = ".json";
const BATCH_SUFFIX: &str = ".batch.json";

/// Verifies that `key` is a valid object key.
pub fn verify_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(Error::invalid_arg("key", format!("invalid object key '{key}'")))
    }
}

pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && key.split('/').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

/// Listing prefix of all shard artifacts of the named index.
pub fn index_prefix(index_name: &str) -> String {
    format!("{INDEX_PREFIX}{index_name}/")
}

/// Key of the artifact of the given (0-based) shard of the named index.
pub fn shard_key(index_name: &str, shard_number: usize) -> String {
    format!("{INDEX_PREFIX}{index_name}/{SHARD_FILE_PREFIX}{shard_number:06}{JSON_SUFFIX}")
}

/// Parses the shard number back out of a shard artifact key.
///
/// Returns `None` for keys that do not follow the shard naming scheme.
pub fn parse_shard_number(key: &str) -> Option<usize> {
    let file_name = key.rsplit('/').next()?;
    file_name
        .strip_prefix(SHARD_FILE_PREFIX)?
        .strip_suffix(JSON_SUFFIX)?
        .parse()
        .ok()
}

/// A fresh, time-ordered key for a single pending submission.
///
/// UUIDv7 identifiers sort by creation time, so a listing of the pending
/// namespace returns submissions in arrival order.
pub fn new_pending_key() -> String {
    format!("{PENDING_PREFIX}{}{JSON_SUFFIX}", uuid::Uuid::now_v7().simple())
}

/// A fresh, time-ordered key for a consolidated batch.
///
/// A new identifier is always generated, so the batch can never overwrite one
/// of the source objects it replaces.
pub fn new_batch_key() -> String {
    format!("{PENDING_PREFIX}{}{BATCH_SUFFIX}", uuid::Uuid::now_v7().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(is_valid_key("articles/1.json"));
        assert!(is_valid_key("search_config.json"));
        assert!(is_valid_key("indexes/movies/shard-000000.json"));

        assert!(!is_valid_key(""));
        assert!(!is_valid_key("/articles/1.json"));
        assert!(!is_valid_key("articles//1.json"));
        assert!(!is_valid_key("articles/../secret"));
        assert!(!is_valid_key("./articles"));
        assert!(!is_valid_key("articles\\1.json"));
        assert!(verify_key("..").is_err());
    }

    #[test]
    fn test_shard_keys() {
        let key = shard_key("movies", 12);
        assert_eq!(key, "indexes/movies/shard-000012.json");
        assert!(key.starts_with(&index_prefix("movies")));
        assert_eq!(parse_shard_number(&key), Some(12));
        assert_eq!(parse_shard_number("indexes/movies/other.json"), None);
        assert!(shard_key("movies", 2) < shard_key("movies", 10));
    }

    #[test]
    fn test_pending_keys_are_time_ordered() {
        let first = new_pending_key();
        let second = new_pending_key();
        assert!(first.starts_with(PENDING_PREFIX));
        assert!(first < second);
        assert!(is_valid_key(&first));

        let batch = new_batch_key();
        assert!(batch.starts_with(PENDING_PREFIX));
        assert!(batch.ends_with(".batch.json"));
        assert!(!first.ends_with(".batch.json"));
        assert!(is_valid_key(&batch));
        assert_ne!(batch, new_batch_key());
    }
}
