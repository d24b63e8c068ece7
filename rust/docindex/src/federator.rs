//! Federated query over all shard artifacts of an index.

use docindex_common::{Result, error::Error};
use docindex_objectstore::{
    ObjectStore,
    key::{index_prefix, parse_shard_number},
};
use docindex_text_index::{InvertedIndex, SearchHit, ShardScorer};
use docindex_workflow::data_parallel;

use crate::{config::is_valid_index_name, context::SearchContext, merge::merge};

/// Answers queries against the shard artifacts stored in the context's store.
///
/// Each query lists the index anew, so a rebuild is picked up by the next
/// query without any invalidation.
pub struct QueryFederator<'a> {
    ctx: &'a SearchContext,
}

impl<'a> QueryFederator<'a> {
    pub fn new(ctx: &'a SearchContext) -> QueryFederator<'a> {
        QueryFederator { ctx }
    }

    /// Queries `index_name` and returns the default number of hits.
    pub fn search(&self, index_name: &str, text: &str) -> Result<Vec<SearchHit>> {
        self.query(index_name, text, self.ctx.options().default_limit)
    }

    /// Queries every shard of `index_name` and merges the results.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` for a malformed index name.
    /// * `NotFound` when the index has no shards.
    /// * `ShardFetch` when any shard cannot be loaded; partial results are
    ///   never returned.
    pub fn query(&self, index_name: &str, text: &str, limit: usize) -> Result<Vec<SearchHit>> {
        if !is_valid_index_name(index_name) {
            return Err(Error::invalid_arg(
                "index",
                format!("'{index_name}' is not a valid index name"),
            ));
        }
        log::info!("searching index '{index_name}' for '{text}'");

        let store = self.ctx.store();
        let keys: Vec<String> = store
            .list(&index_prefix(index_name))?
            .into_iter()
            .filter(|key| parse_shard_number(key).is_some())
            .collect();
        if keys.is_empty() {
            return Err(Error::not_found(format!(
                "index '{index_name}'; make sure it is configured and documents were added"
            )));
        }
        log::debug!("index '{index_name}' has {} shard(s)", keys.len());

        let per_shard = data_parallel::try_map(Some(self.ctx.pool()), keys, |key| {
            score_shard(store, &key, text, limit)
                .map_err(|e| Error::shard_fetch(index_name, key.as_str(), e))
        })?;
        Ok(merge(per_shard, limit))
    }
}

fn score_shard(store: &dyn ObjectStore, key: &str, text: &str, limit: usize) -> Result<Vec<SearchHit>> {
    let index = InvertedIndex::from_bytes(&store.get(key)?)?;
    Ok(ShardScorer::new(&index)?.score(text, limit))
}
