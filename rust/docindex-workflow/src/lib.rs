//! Workflow execution utilities for bounded parallel fan-out.
//!
//! Every fan-out in the search pipeline (fetching pending documents, building
//! shard artifacts, loading and scoring shards at query time) goes through a
//! [`worker_pool::WorkerPool`], which caps the number of in-flight tasks. The
//! [`data_parallel`] functions pick between sequential and pooled execution.

pub mod data_parallel;
pub mod worker_pool;

pub use worker_pool::WorkerPool;
