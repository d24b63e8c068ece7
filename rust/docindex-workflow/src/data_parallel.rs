//! Parallel data processing utilities.
//!
//! [`try_map`] processes a collection either sequentially or on a
//! [`WorkerPool`], depending on the size of the collection and on whether a
//! pool is supplied. Single items and pool-less calls run inline on the
//! calling thread.

use docindex_common::Result;

use crate::WorkerPool;

/// Maps the fallible `f` over `items`, in parallel when a pool is given and
/// there is more than one item.
///
/// Returns all results in input order, or an error if any item failed.
pub fn try_map<T, F, R>(pool: Option<&WorkerPool>, items: Vec<T>, f: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Send + Sync,
{
    match pool {
        Some(pool) if items.len() > 1 && pool.num_workers() > 1 => pool.try_map(items, f),
        _ => items.into_iter().map(f).collect(),
    }
}
