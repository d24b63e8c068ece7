//! Sharded document indexing and federated search over an object store.
//!
//! Documents are submitted into a pending namespace of the store
//! ([`ingest::Ingestor`]), periodically merged into batches
//! ([`consolidator::Consolidator`]) and indexed by a full rebuild
//! ([`pipeline::IndexPipeline`]): for every configured index the corpus is
//! partitioned into fixed-size shards ([`planner::partition`]) and each shard
//! becomes one inverted index artifact ([`indexer::build`]).
//!
//! Queries ([`federator::QueryFederator`]) load every artifact of an index,
//! score each one independently and merge the per-shard rankings
//! ([`merge::merge`]).
//!
//! Every component receives an explicit [`SearchContext`] holding the object
//! store, the engine options and the shared worker pool. Nothing is cached
//! between calls: the configuration and the key listings are read anew each
//! time.

pub mod config;
pub mod consolidator;
pub mod context;
pub mod corpus;
pub mod document;
pub mod federator;
pub mod indexer;
pub mod ingest;
pub mod merge;
pub mod pipeline;
pub mod planner;
pub mod readiness;

pub use config::{ConfigStore, ConfigUpdate, EngineOptions, IndexConfig, SearchConfig};
pub use context::SearchContext;
pub use docindex_text_index::SearchHit;
pub use document::Document;
