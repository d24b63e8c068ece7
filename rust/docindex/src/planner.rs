//! Partitioning of the ordered corpus into fixed-size shards.

use docindex_common::{Result, verify_arg};
use docindex_objectstore::key::shard_key;

use crate::document::Document;

/// One shard of an index: a contiguous slice of the corpus.
///
/// Shard `k` holds documents `[k * shard_size, (k + 1) * shard_size)`.
#[derive(Debug, Clone, Copy)]
pub struct Shard<'a> {
    pub index_name: &'a str,
    pub shard_number: usize,
    pub documents: &'a [Document],
}

impl Shard<'_> {
    /// Object key of this shard's artifact.
    pub fn key(&self) -> String {
        shard_key(self.index_name, self.shard_number)
    }
}

/// Cuts `docs` into `ceil(len / shard_size)` order-preserving shards; only the
/// last one may be short. An empty corpus yields no shards.
pub fn partition<'a>(
    index_name: &'a str,
    docs: &'a [Document],
    shard_size: usize,
) -> Result<Vec<Shard<'a>>> {
    verify_arg!(shard_size, shard_size > 0);
    Ok(docs
        .chunks(shard_size)
        .enumerate()
        .map(|(shard_number, documents)| Shard {
            index_name,
            shard_number,
            documents,
        })
        .collect())
}
