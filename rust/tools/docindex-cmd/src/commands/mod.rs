//! Command implementations for docindex-cmd

use std::{
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use docindex::{EngineOptions, SearchContext};
use docindex_objectstore::local_store::LocalFsObjectStore;
use serde::Serialize;

pub mod add;
pub mod config;
pub mod consolidate;
pub mod rebuild;
pub mod search;

/// The store and engine every command runs against.
pub struct Env {
    pub ctx: SearchContext,
}

impl Env {
    pub fn open(store_dir: &Path, options: Option<&Path>) -> Result<Env> {
        let options = match options {
            Some(path) => EngineOptions::from_file(path)
                .with_context(|| format!("Failed to load engine options from {}", path.display()))?,
            None => EngineOptions::default(),
        };
        let store = LocalFsObjectStore::new(store_dir)
            .with_context(|| format!("Failed to open store at {}", store_dir.display()))?;
        log::debug!(
            "opened store at {} with {} worker(s)",
            store_dir.display(),
            options.worker_limit
        );
        let ctx = SearchContext::new(Arc::new(store), options)?;
        Ok(Env { ctx })
    }
}

/// Reads a JSON document from `file`, or from stdin when no file is given.
pub fn read_json_input(file: Option<&PathBuf>) -> Result<serde_json::Value> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("Input is not valid JSON")
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_store_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().join("store");
        let env = Env::open(&root, None).unwrap();
        assert!(root.is_dir());
        assert!(env.ctx.store().list("").unwrap().is_empty());

        env.ctx.shared_store().put("articles/a.json", b"{}").unwrap();
        assert_eq!(env.ctx.store().list("articles/").unwrap(), vec!["articles/a.json"]);
        assert!(root.join("articles").join("a.json").is_file());
    }

    #[test]
    fn test_read_json_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"title": "Heat"}"#).unwrap();
        let value = read_json_input(Some(&path)).unwrap();
        assert_eq!(value["title"], "Heat");

        std::fs::write(&path, "{oops").unwrap();
        assert!(read_json_input(Some(&path)).is_err());
    }
}
