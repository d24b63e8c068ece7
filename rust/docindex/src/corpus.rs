//! Access to the pending namespace: the submitted, not necessarily
//! consolidated, documents.

use docindex_common::Result;
use docindex_objectstore::{ObjectStore, json::get_json, key::PENDING_PREFIX};
use docindex_workflow::data_parallel;
use serde_json::Value;

use crate::{
    context::SearchContext,
    document::{Document, flatten_value},
};

/// A stored submission: its key and its raw JSON content.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingObject {
    pub key: String,
    pub value: Value,
}

/// Lists the pending namespace and fetches every object on the worker pool.
///
/// Objects are returned in key order, which is submission order.
pub fn fetch_pending(ctx: &SearchContext) -> Result<Vec<PendingObject>> {
    let keys = ctx.store().list(PENDING_PREFIX)?;
    fetch_objects(ctx, keys)
}

/// Fetches the given pending objects on the worker pool, preserving order.
pub fn fetch_objects(ctx: &SearchContext, keys: Vec<String>) -> Result<Vec<PendingObject>> {
    let store = ctx.store();
    data_parallel::try_map(Some(ctx.pool()), keys, |key| {
        let value = get_json::<Value>(store, &key)?;
        Ok(PendingObject { key, value })
    })
}

/// Flattens pending objects into the ordered corpus.
pub fn flatten(pending: Vec<PendingObject>) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for object in pending {
        documents.extend(flatten_value(object.value, &object.key)?);
    }
    Ok(documents)
}

/// Loads the whole corpus in submission order.
pub fn load_corpus(ctx: &SearchContext) -> Result<Vec<Document>> {
    let pending = fetch_pending(ctx)?;
    log::debug!("fetched {} pending objects", pending.len());
    flatten(pending)
}
