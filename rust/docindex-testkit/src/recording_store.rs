use std::sync::{Arc, Mutex, MutexGuard};

use docindex_common::{Result, error::Error};
use docindex_objectstore::{ListPage, ObjectStore, memory_store::MemoryObjectStore};

/// A store operation, as observed by [`RecordingObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    List(String),
    Get(String),
    Put(String),
    Delete(String),
}

impl StoreOp {
    pub fn key(&self) -> &str {
        match self {
            StoreOp::List(key) | StoreOp::Get(key) | StoreOp::Put(key) | StoreOp::Delete(key) => key,
        }
    }
}

#[derive(Default)]
struct Recorder {
    ops: Vec<StoreOp>,
    fail_puts_with_prefix: Option<String>,
}

/// An in-memory store that records every operation in call order.
///
/// Writes can be made to fail for keys under a prefix, to exercise the
/// failure paths of multi-step operations.
#[derive(Clone, Default)]
pub struct RecordingObjectStore {
    inner: MemoryObjectStore,
    recorder: Arc<Mutex<Recorder>>,
}

impl RecordingObjectStore {
    pub fn new() -> RecordingObjectStore {
        Default::default()
    }

    /// The wrapped store; operations on it are not recorded.
    pub fn inner(&self) -> &MemoryObjectStore {
        &self.inner
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.recorder().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.recorder().ops.clear();
    }

    /// Makes every subsequent `put` of a key starting with `prefix` fail.
    pub fn fail_puts_with_prefix(&self, prefix: impl Into<String>) {
        self.recorder().fail_puts_with_prefix = Some(prefix.into());
    }

    fn recorder(&self) -> MutexGuard<'_, Recorder> {
        self.recorder
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, op: StoreOp) {
        self.recorder().ops.push(op);
    }
}

impl ObjectStore for RecordingObjectStore {
    fn list_page(
        &self,
        prefix: &str,
        start_after: Option<&str>,
        max_keys: usize,
    ) -> Result<ListPage> {
        self.record(StoreOp::List(prefix.to_string()));
        self.inner.list_page(prefix, start_after, max_keys)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.record(StoreOp::Get(key.to_string()));
        self.inner.get(key)
    }

    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.record(StoreOp::Put(key.to_string()));
        let fail = self
            .recorder()
            .fail_puts_with_prefix
            .as_deref()
            .is_some_and(|prefix| key.starts_with(prefix));
        if fail {
            return Err(Error::store(
                format!("put {key}"),
                std::io::Error::other("injected write failure"),
            ));
        }
        self.inner.put(key, data)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.record(StoreOp::Delete(key.to_string()));
        self.inner.delete(key)
    }
}
