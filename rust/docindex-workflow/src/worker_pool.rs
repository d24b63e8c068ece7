//! Fixed-size worker pool for fan-out over object store I/O and CPU-bound
//! per-shard work.

use std::sync::Arc;

use docindex_common::{Result, error::Error};
use rayon::prelude::*;

/// Upper bound for the default worker count.
pub const MAX_DEFAULT_WORKERS: usize = 16;

/// A fixed-size pool of worker threads.
///
/// At most [`WorkerPool::num_workers`] tasks submitted through one pool run at
/// the same time, regardless of how many items are handed to [`WorkerPool::try_map`].
/// Each task receives its own input and returns its own output; the pool never
/// shares mutable state between tasks.
#[derive(Clone)]
pub struct WorkerPool {
    thread_pool: Arc<rayon::ThreadPool>,
    num_workers: usize,
}

impl WorkerPool {
    /// Creates a pool with `num_workers` threads.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `num_workers` is zero, or an operation
    /// error if the threads cannot be spawned.
    pub fn new(num_workers: usize) -> Result<WorkerPool> {
        docindex_common::verify_arg!(num_workers, num_workers > 0);
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("docindex_worker_{i}"))
            .build()
            .map_err(|e| Error::invalid_operation(format!("start worker pool: {e}")))?;
        log::debug!("started worker pool with {num_workers} threads");
        Ok(WorkerPool {
            thread_pool: Arc::new(thread_pool),
            num_workers,
        })
    }

    /// Default worker count: the available parallelism of the machine, capped at
    /// [`MAX_DEFAULT_WORKERS`].
    pub fn default_num_workers() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(MAX_DEFAULT_WORKERS)
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Applies the fallible `f` to every item on the pool.
    ///
    /// Returns the results in input order, or one of the errors. Once a task has
    /// failed, tasks that have not started yet are skipped.
    pub fn try_map<T, R, F>(&self, items: Vec<T>, f: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Send + Sync,
    {
        self.thread_pool
            .install(|| items.into_par_iter().map(f).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_zero_workers_rejected() {
        assert!(WorkerPool::new(0).is_err());
        assert!(WorkerPool::default_num_workers() >= 1);
        assert!(WorkerPool::default_num_workers() <= MAX_DEFAULT_WORKERS);
    }

    #[test]
    fn test_map_preserves_order() {
        let pool = WorkerPool::new(4).unwrap();
        let items: Vec<usize> = (0..100).collect();
        let squares = pool.try_map(items, |i| Ok(i * i)).unwrap();
        assert_eq!(squares.len(), 100);
        assert!(squares.iter().enumerate().all(|(i, &s)| s == i * i));
    }

    #[test]
    fn test_concurrency_is_bounded() {
        let pool = WorkerPool::new(3).unwrap();
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        pool.try_map((0..48).collect::<Vec<_>>(), |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(2));
            active.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_try_map_fails_as_a_whole() {
        let pool = WorkerPool::new(2).unwrap();
        let result = pool.try_map((0..10).collect::<Vec<u32>>(), |i| {
            if i == 7 {
                Err(Error::not_found(format!("item {i}")))
            } else {
                Ok(i)
            }
        });
        assert!(result.unwrap_err().is_not_found());

        let result = pool.try_map(vec![1u32, 2, 3], |i| Ok(i + 1)).unwrap();
        assert_eq!(result, vec![2, 3, 4]);
    }
}
