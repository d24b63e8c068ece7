//! Batch consolidation of the pending namespace.
//!
//! Many small submissions make every rebuild fetch many small objects. Once
//! more than the configured threshold of pending objects has accumulated, they
//! are merged into a single batch object and the sources are removed.
//!
//! The batch is always written before any source is deleted, so a failure at
//! any point leaves every document in the store at least once.

use docindex_common::{Result, error::Error};
use docindex_objectstore::{
    ObjectStore,
    json::put_json,
    key::{PENDING_PREFIX, new_batch_key},
};

use crate::{
    context::SearchContext,
    corpus::{PendingObject, fetch_objects},
    document::{Document, flatten_value},
};

/// What a consolidation will do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsolidationPlan {
    /// Documents of the new batch; `None` when there is nothing to write.
    pub merged: Option<Vec<Document>>,
    /// Source keys to delete once the batch is written.
    pub to_delete: Vec<String>,
}

impl ConsolidationPlan {
    pub fn is_noop(&self) -> bool {
        self.merged.is_none() && self.to_delete.is_empty()
    }
}

/// Plans the consolidation of `pending`.
///
/// Up to `threshold` objects nothing is done. Above it all values are
/// flattened, in the given order, into one batch and every source key is
/// scheduled for deletion. A value that is neither an object nor an array of
/// objects fails the whole plan.
pub fn consolidate(pending: &[PendingObject], threshold: usize) -> Result<ConsolidationPlan> {
    if pending.len() <= threshold {
        return Ok(ConsolidationPlan::default());
    }
    let mut merged = Vec::new();
    for object in pending {
        merged.extend(flatten_value(object.value.clone(), &object.key)?);
    }
    if merged.is_empty() {
        return Ok(ConsolidationPlan::default());
    }
    Ok(ConsolidationPlan {
        merged: Some(merged),
        to_delete: pending.iter().map(|p| p.key.clone()).collect(),
    })
}

/// Result of a consolidation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsolidationOutcome {
    /// Too few pending objects (or no documents in them).
    NothingToDo { pending: usize },
    Consolidated {
        batch_key: String,
        documents: usize,
        deleted: usize,
    },
}

/// Executes consolidation plans against the store.
pub struct Consolidator<'a> {
    ctx: &'a SearchContext,
}

impl<'a> Consolidator<'a> {
    pub fn new(ctx: &'a SearchContext) -> Consolidator<'a> {
        Consolidator { ctx }
    }

    pub fn run(&self) -> Result<ConsolidationOutcome> {
        let store = self.ctx.store();
        let keys = store.list(PENDING_PREFIX)?;
        let threshold = self.ctx.options().consolidation_threshold;
        if keys.len() <= threshold {
            log::info!(
                "no batching needed, {} pending object(s) (threshold {threshold})",
                keys.len()
            );
            return Ok(ConsolidationOutcome::NothingToDo {
                pending: keys.len(),
            });
        }

        let pending = fetch_objects(self.ctx, keys)?;
        let plan = consolidate(&pending, threshold)?;
        let Some(merged) = plan.merged else {
            log::info!("pending objects hold no documents, nothing to batch");
            return Ok(ConsolidationOutcome::NothingToDo {
                pending: pending.len(),
            });
        };

        let batch_key = new_batch_key();
        put_json(store, &batch_key, &merged).map_err(|e| {
            log::warn!("failed to write batch {batch_key}, sources kept: {e}");
            e
        })?;
        log::info!("batched {} documents as {batch_key}", merged.len());

        for key in &plan.to_delete {
            store.delete(key).map_err(|e| {
                Error::invalid_operation(format!(
                    "delete consolidated source {key} (batch {batch_key} already written): {e}"
                ))
            })?;
        }
        log::debug!("deleted {} consolidated source object(s)", plan.to_delete.len());

        Ok(ConsolidationOutcome::Consolidated {
            batch_key,
            documents: merged.len(),
            deleted: plan.to_delete.len(),
        })
    }
}
