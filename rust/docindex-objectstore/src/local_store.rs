use std::{
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
};

use docindex_common::{Result, error::Error};

use crate::{ListPage, ObjectStore, key::verify_key, paginate};

/// Suffix of the scratch files used to make `put` atomic. Files carrying it
/// are never reported by listings.
const PARTIAL_SUFFIX: &str = ".partial";

/// A `LocalFsObjectStore` implementation that manages objects on the local filesystem,
/// confined to a specified container directory.
///
/// Object keys are interpreted as paths relative to the container, which acts as a
/// "virtual root": `indexes/movies/shard-000000.json` is stored at
/// `<container>/indexes/movies/shard-000000.json`. Key validation guarantees that no
/// key can escape the container.
pub struct LocalFsObjectStore {
    /// The top-level directory for this object store.
    container_path: PathBuf,
}

impl LocalFsObjectStore {
    /// Creates a new `LocalFsObjectStore` with the given container directory.
    ///
    /// The container directory will be created if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `container_path`: The path to the directory that will serve as the root
    ///   of the object store.
    pub fn new(container_path: &Path) -> Result<LocalFsObjectStore> {
        std::fs::create_dir_all(container_path).map_err(|e| {
            Error::io(
                format!("create local object store container {}", container_path.display()),
                e,
            )
        })?;
        if !container_path.is_dir() {
            return Err(Error::invalid_arg(
                "container",
                format!("invalid path {container_path:?} for local object store"),
            ));
        }
        Ok(LocalFsObjectStore {
            container_path: container_path.to_path_buf(),
        })
    }

    /// Returns the file system path of the store's top-level container.
    pub fn container_path(&self) -> &Path {
        &self.container_path
    }

    /// Converts an object key to a local filesystem path inside the container.
    pub fn key_to_path(&self, key: &str) -> Result<PathBuf> {
        verify_key(key)?;
        Ok(key
            .split('/')
            .fold(self.container_path.clone(), |path, segment| path.join(segment)))
    }

    /// Recursively collects the keys of all objects below `dir`.
    fn collect_keys(&self, dir: &Path, relative: &str, keys: &mut Vec<String>) -> Result<()> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::io(format!("list {}", dir.display()), e)),
        };
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(format!("list {}", dir.display()), e))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                log::warn!("skipping non UTF-8 entry in {}", dir.display());
                continue;
            };
            let key = format!("{relative}{name}");
            let file_type = entry
                .file_type()
                .map_err(|e| Error::io(format!("stat {key}"), e))?;
            if file_type.is_dir() {
                self.collect_keys(&entry.path(), &format!("{key}/"), keys)?;
            } else if !name.ends_with(PARTIAL_SUFFIX) {
                keys.push(key);
            }
        }
        Ok(())
    }
}

impl ObjectStore for LocalFsObjectStore {
    fn list_page(
        &self,
        prefix: &str,
        start_after: Option<&str>,
        max_keys: usize,
    ) -> Result<ListPage> {
        // Only the directory part of the prefix narrows the walk; the remainder
        // is matched against file names.
        let (dir_prefix, walk_root) = match prefix.rfind('/') {
            Some(pos) => (&prefix[..=pos], self.key_to_path(&prefix[..pos])?),
            None => ("", self.container_path.clone()),
        };
        let mut keys = Vec::new();
        self.collect_keys(&walk_root, dir_prefix, &mut keys)?;
        keys.retain(|k| k.starts_with(prefix));
        keys.sort_unstable();
        Ok(paginate(keys.iter().map(String::as_str), start_after, max_keys))
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.key_to_path(key)?;
        match std::fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == IoErrorKind::NotFound => Err(Error::not_found(key)),
            Err(e) => Err(Error::io(format!("read {key}"), e)),
        }
    }

    /// Writes the object through a scratch file followed by a rename, so readers
    /// never observe a partially written object.
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.key_to_path(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(format!("put {key}"), e))?;
        }
        let mut scratch = path.clone().into_os_string();
        scratch.push(format!(".{}{PARTIAL_SUFFIX}", uuid::Uuid::new_v4().simple()));
        let scratch = PathBuf::from(scratch);
        std::fs::write(&scratch, data).map_err(|e| Error::io(format!("put {key}"), e))?;
        std::fs::rename(&scratch, &path).map_err(|e| {
            let _ = std::fs::remove_file(&scratch);
            Error::io(format!("put {key}"), e)
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_to_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(format!("delete {key}"), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::LocalFsObjectStore;
    use crate::ObjectStore;

    fn create_temp_fs() -> (LocalFsObjectStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let fs = LocalFsObjectStore::new(dir.path()).unwrap();
        (fs, dir)
    }

    #[test]
    fn test_local_fs_creation() {
        let (fs, dir) = create_temp_fs();
        fs.put("aaa/bbb/test.txt", b"abcdefg").unwrap();

        let test_path = fs.key_to_path("aaa/bbb/test.txt").unwrap();
        assert!(test_path.is_file());
        assert!(test_path.starts_with(dir.path()));

        let data = fs.get("aaa/bbb/test.txt").unwrap();
        assert_eq!(data, b"abcdefg");
    }

    #[test]
    fn test_local_fs_overwrite() {
        let (fs, _dir) = create_temp_fs();
        fs.put("search_config.json", b"first").unwrap();
        fs.put("search_config.json", b"second").unwrap();
        assert_eq!(fs.get("search_config.json").unwrap(), b"second");
        // no scratch files are left behind or listed
        assert_eq!(fs.list("").unwrap(), vec!["search_config.json"]);
    }

    #[test]
    fn test_local_fs_listing() {
        let (fs, _dir) = create_temp_fs();
        for key in [
            "articles/b.json",
            "articles/a.json",
            "articles_all.json",
            "indexes/movies/shard-000001.json",
            "indexes/movies/shard-000000.json",
            "indexes/movies-old/shard-000000.json",
        ] {
            fs.put(key, b"{}").unwrap();
        }

        assert_eq!(
            fs.list("articles/").unwrap(),
            vec!["articles/a.json", "articles/b.json"]
        );
        assert_eq!(
            fs.list("indexes/movies/").unwrap(),
            vec![
                "indexes/movies/shard-000000.json",
                "indexes/movies/shard-000001.json"
            ]
        );
        assert_eq!(fs.list("indexes/movies").unwrap().len(), 3);
        assert_eq!(fs.list("articles").unwrap().len(), 3);
        assert!(fs.list("indexes/books/").unwrap().is_empty());

        let page = fs.list_page("indexes/", None, 2).unwrap();
        assert_eq!(page.keys.len(), 2);
        assert!(page.next_start_after.is_some());
    }

    #[test]
    fn test_local_fs_missing_and_delete() {
        let (fs, _dir) = create_temp_fs();
        assert!(fs.get("articles/none.json").unwrap_err().is_not_found());

        fs.put("articles/1.json", b"{}").unwrap();
        fs.delete("articles/1.json").unwrap();
        assert!(fs.get("articles/1.json").unwrap_err().is_not_found());
        fs.delete("articles/1.json").unwrap();
    }

    #[test]
    fn test_local_fs_rejects_escaping_keys() {
        let (fs, _dir) = create_temp_fs();
        assert!(fs.put("../outside.json", b"{}").is_err());
        assert!(fs.get("/etc/passwd").is_err());
        assert!(fs.key_to_path("a/./b").is_err());
    }
}
