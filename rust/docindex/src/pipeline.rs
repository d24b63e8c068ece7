//! Full rebuild of every configured index from the pending namespace.
//!
//! A rebuild reads the configuration and the whole corpus, then for each index:
//! partitions the corpus, builds and writes all shard artifacts on the worker
//! pool, and finally deletes artifacts left over from a previous generation
//! with more shards. Artifacts are always replaced wholesale.

use docindex_common::Result;
use docindex_objectstore::{
    ObjectStore,
    json::put_json,
    key::{CORPUS_SNAPSHOT_KEY, index_prefix, parse_shard_number},
};
use docindex_workflow::data_parallel;

use crate::{
    config::{IndexConfig, load_search_config},
    consolidator::{ConsolidationOutcome, Consolidator},
    context::SearchContext,
    corpus::load_corpus,
    document::Document,
    indexer, planner,
};

/// Per-index result of a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    pub name: String,
    pub shards: usize,
    /// Artifacts of a previous generation removed by this rebuild.
    pub stale_deleted: usize,
}

/// Result of a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildReport {
    pub documents: usize,
    pub indexes: Vec<IndexReport>,
}

impl RebuildReport {
    pub fn shard_count(&self, index_name: &str) -> Option<usize> {
        self.indexes
            .iter()
            .find(|r| r.name == index_name)
            .map(|r| r.shards)
    }
}

/// Result of [`IndexPipeline::ingest_cycle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestCycleReport {
    pub consolidation: ConsolidationOutcome,
    pub rebuild: RebuildReport,
}

pub struct IndexPipeline<'a> {
    ctx: &'a SearchContext,
}

impl<'a> IndexPipeline<'a> {
    pub fn new(ctx: &'a SearchContext) -> IndexPipeline<'a> {
        IndexPipeline { ctx }
    }

    /// Rebuilds every configured index.
    ///
    /// Fails with `NotFound` when no search configuration has been set.
    pub fn rebuild(&self) -> Result<RebuildReport> {
        let config = load_search_config(self.ctx.store())?;
        let documents = load_corpus(self.ctx)?;
        log::info!(
            "rebuilding {} index(es) over {} documents",
            config.configs.len(),
            documents.len()
        );

        let indexes = config
            .configs
            .iter()
            .map(|index_config| self.rebuild_index(index_config, &documents))
            .collect::<Result<Vec<_>>>()?;

        put_json(self.ctx.store(), CORPUS_SNAPSHOT_KEY, &documents)?;
        log::debug!("wrote corpus snapshot {CORPUS_SNAPSHOT_KEY}");

        Ok(RebuildReport {
            documents: documents.len(),
            indexes,
        })
    }

    /// Consolidates the pending namespace, then rebuilds.
    pub fn ingest_cycle(&self) -> Result<IngestCycleReport> {
        let consolidation = Consolidator::new(self.ctx).run()?;
        let rebuild = self.rebuild()?;
        Ok(IngestCycleReport {
            consolidation,
            rebuild,
        })
    }

    fn rebuild_index(&self, config: &IndexConfig, documents: &[Document]) -> Result<IndexReport> {
        let shard_size = config.shard_size(self.ctx.options().default_shard_size)?;
        let shards = planner::partition(&config.name, documents, shard_size)?;
        let shard_count = shards.len();

        let store = self.ctx.store();
        data_parallel::try_map(Some(self.ctx.pool()), shards, |shard| {
            let index = indexer::build(&shard, config);
            let key = shard.key();
            store.put(&key, &index.to_bytes()?)?;
            log::debug!(
                "uploaded {key}: {} documents, {} terms",
                index.document_count,
                index.term_count()
            );
            Ok(())
        })?;

        let stale_deleted = self.delete_stale(&config.name, shard_count)?;
        log::info!(
            "index '{}': {shard_count} shard(s) of up to {shard_size} documents, {stale_deleted} stale removed",
            config.name
        );
        Ok(IndexReport {
            name: config.name.clone(),
            shards: shard_count,
            stale_deleted,
        })
    }

    /// Deletes artifacts whose shard number is beyond the new shard count.
    fn delete_stale(&self, index_name: &str, shard_count: usize) -> Result<usize> {
        let store = self.ctx.store();
        let stale: Vec<String> = store
            .list(&index_prefix(index_name))?
            .into_iter()
            .filter(|key| parse_shard_number(key).is_some_and(|n| n >= shard_count))
            .collect();
        for key in &stale {
            store.delete(key)?;
        }
        Ok(stale.len())
    }
}
