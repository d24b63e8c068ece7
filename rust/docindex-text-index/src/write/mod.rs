//! Construction of inverted index artifacts.
//!
//! The builder keeps the whole shard's term space in memory: shards are bounded
//! by the configured shard size, so a shard's postings always fit comfortably.
//! Ordered maps are used throughout, which makes the produced artifact
//! independent of hashing and insertion order.

pub mod builder;
