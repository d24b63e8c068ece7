use std::sync::Arc;

use docindex_common::Result;
use docindex_objectstore::ObjectStore;
use docindex_workflow::WorkerPool;

use crate::config::EngineOptions;

/// Everything a pipeline or query component needs: the object store, the
/// engine options and the worker pool that bounds all fan-out work.
///
/// Cloning is cheap; clones share the store and the pool.
#[derive(Clone)]
pub struct SearchContext {
    store: Arc<dyn ObjectStore>,
    options: EngineOptions,
    pool: WorkerPool,
}

impl SearchContext {
    pub fn new(store: Arc<dyn ObjectStore>, options: EngineOptions) -> Result<SearchContext> {
        options.validate()?;
        let pool = WorkerPool::new(options.worker_limit)?;
        Ok(SearchContext {
            store,
            options,
            pool,
        })
    }

    /// A context with default options.
    pub fn with_store(store: Arc<dyn ObjectStore>) -> Result<SearchContext> {
        SearchContext::new(store, EngineOptions::default())
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn shared_store(&self) -> Arc<dyn ObjectStore> {
        self.store.clone()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }
}
