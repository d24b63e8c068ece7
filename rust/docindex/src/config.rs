//! Search configuration and engine options.
//!
//! The search configuration lives in the object store under
//! [`CONFIG_KEY`] and lists the indexes to build:
//!
//! ```json
//! {"configs": [{"name": "movies", "ref": "id", "fields": ["title", "director"], "shards": 500}]}
//! ```
//!
//! It is read anew by every rebuild and never cached.

use std::{collections::HashSet, path::Path, sync::Arc};

use docindex_common::{Result, error::Error};
use docindex_objectstore::{
    ObjectStore,
    json::{put_json, try_get_json},
    key::CONFIG_KEY,
};
use docindex_workflow::WorkerPool;
use serde::{Deserialize, Serialize};

/// Default number of documents per shard when an index config leaves it unset.
pub const DEFAULT_SHARD_SIZE: usize = 1000;

/// Number of pending objects up to which consolidation is skipped.
pub const DEFAULT_CONSOLIDATION_THRESHOLD: usize = 5;

/// Default number of hits returned by a query.
pub const DEFAULT_QUERY_LIMIT: usize = 25;

/// Configuration of one named index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub name: String,
    /// Field holding the document reference.
    #[serde(rename = "ref")]
    pub ref_field: String,
    /// Fields whose text is indexed.
    pub fields: Vec<String>,
    /// Documents per shard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<i64>,
}

impl IndexConfig {
    pub fn new(name: impl Into<String>, ref_field: impl Into<String>, fields: &[&str]) -> Self {
        IndexConfig {
            name: name.into(),
            ref_field: ref_field.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            shards: None,
        }
    }

    pub fn with_shards(mut self, shards: i64) -> Self {
        self.shards = Some(shards);
        self
    }

    /// Effective shard size: the configured one, or `default` when unset.
    pub fn shard_size(&self, default: usize) -> Result<usize> {
        match self.shards {
            None => Ok(default),
            Some(shards) if shards > 0 => usize::try_from(shards)
                .map_err(|_| Error::invalid_arg("shards", format!("{shards} is out of range"))),
            Some(shards) => Err(Error::invalid_arg(
                "shards",
                format!("index '{}': shard size must be positive, got {shards}", self.name),
            )),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_index_name(&self.name) {
            return Err(Error::invalid_arg(
                "name",
                format!("'{}' is not a valid index name, expected [a-z-]+", self.name),
            ));
        }
        if self.ref_field.is_empty() {
            return Err(Error::invalid_arg(
                "ref",
                format!("index '{}': ref field is empty", self.name),
            ));
        }
        if self.fields.is_empty() || self.fields.iter().any(String::is_empty) {
            return Err(Error::invalid_arg(
                "fields",
                format!("index '{}': fields must be a non-empty list of names", self.name),
            ));
        }
        self.shard_size(DEFAULT_SHARD_SIZE).map(|_| ())
    }
}

/// Index names are non-empty and consist of lowercase ASCII letters and `-`.
pub fn is_valid_index_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase() || b == b'-')
}

/// The stored search configuration: all indexes to build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub configs: Vec<IndexConfig>,
}

impl SearchConfig {
    pub fn new(configs: Vec<IndexConfig>) -> SearchConfig {
        SearchConfig { configs }
    }

    /// Validates the configuration as a whole: a single bad index config
    /// rejects the document.
    pub fn validate(&self) -> Result<()> {
        if self.configs.is_empty() {
            return Err(Error::invalid_arg("configs", "at least one index config is required"));
        }
        let mut names = HashSet::new();
        for config in &self.configs {
            config.validate()?;
            if !names.insert(config.name.as_str()) {
                return Err(Error::invalid_arg(
                    "name",
                    format!("index '{}' is configured more than once", config.name),
                ));
            }
        }
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&IndexConfig> {
        self.configs.iter().find(|c| c.name == name)
    }
}

/// Loads and validates the stored search configuration.
///
/// A missing configuration is reported as `NotFound`.
pub fn load_search_config(store: &dyn ObjectStore) -> Result<SearchConfig> {
    let config: SearchConfig = try_get_json(store, CONFIG_KEY)?.ok_or_else(|| {
        Error::not_found("search configuration; set the search index configuration first")
    })?;
    config.validate()?;
    Ok(config)
}

/// A configuration write request, authorized by the shared secret `key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub key: String,
    pub configs: Vec<IndexConfig>,
}

/// Reads and writes the search configuration document.
///
/// Writes are gated by a single deployment-wide secret; the secret itself is
/// never written to the store.
pub struct ConfigStore {
    store: Arc<dyn ObjectStore>,
    secret: String,
}

impl ConfigStore {
    /// Creates a config store. An empty `secret` rejects every update.
    pub fn new(store: Arc<dyn ObjectStore>, secret: impl Into<String>) -> ConfigStore {
        ConfigStore {
            store,
            secret: secret.into(),
        }
    }

    pub fn get(&self) -> Result<SearchConfig> {
        load_search_config(self.store.as_ref())
    }

    pub fn update(&self, update: ConfigUpdate) -> Result<SearchConfig> {
        if self.secret.is_empty() || update.key != self.secret {
            log::warn!("rejected search configuration update: invalid key");
            return Err(Error::unauthorized("invalid key for the search configuration"));
        }
        let config = SearchConfig::new(update.configs);
        config.validate()?;
        put_json(self.store.as_ref(), CONFIG_KEY, &config)?;
        log::info!(
            "updated search configuration: {} index(es)",
            config.configs.len()
        );
        Ok(config)
    }
}

/// Tunables of the indexing pipeline and the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
    /// Size of the worker pool used for all fan-out work.
    pub worker_limit: usize,
    /// Pending object count up to which consolidation is a no-op.
    pub consolidation_threshold: usize,
    /// Shard size for index configs that do not set one.
    pub default_shard_size: usize,
    /// Number of hits returned when a query does not ask for a count.
    pub default_limit: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            worker_limit: WorkerPool::default_num_workers(),
            consolidation_threshold: DEFAULT_CONSOLIDATION_THRESHOLD,
            default_shard_size: DEFAULT_SHARD_SIZE,
            default_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl EngineOptions {
    /// Reads options from a JSON file; absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<EngineOptions> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("read {}", path.display()), e))?;
        let options: EngineOptions = serde_json::from_slice(&bytes)
            .map_err(|e| Error::invalid_format_msg("engine options", e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        docindex_common::verify_arg!(worker_limit, self.worker_limit > 0);
        docindex_common::verify_arg!(default_shard_size, self.default_shard_size > 0);
        docindex_common::verify_arg!(default_limit, self.default_limit > 0);
        Ok(())
    }
}
