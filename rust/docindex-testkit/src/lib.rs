//! Test utilities for the docindex crates.
//!
//! - [`data_gen`]: synthetic movie corpora
//! - [`recording_store`]: an object store that records the order of operations
//!   and can inject write failures
//! - [`temp_local_store`]: a filesystem store rooted in a temporary directory

pub mod data_gen;
pub mod recording_store;

use docindex_objectstore::local_store::LocalFsObjectStore;
use tempfile::TempDir;

/// Creates a [`LocalFsObjectStore`] in a fresh temporary directory. The store
/// is usable for as long as the returned `TempDir` is alive.
pub fn temp_local_store() -> std::io::Result<(LocalFsObjectStore, TempDir)> {
    let dir = TempDir::new()?;
    let store = LocalFsObjectStore::new(dir.path())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok((store, dir))
}
