//! Submission of new documents into the pending namespace.

use docindex_common::{Result, error::Error};
use docindex_objectstore::{ObjectStore, key::new_pending_key};
use docindex_workflow::data_parallel;
use serde_json::Value;

use crate::{
    context::SearchContext,
    document::{Document, value_kind},
};

/// One add request: a single document or a list of documents.
#[derive(Debug, Clone, PartialEq)]
pub enum AddRequest {
    One(Document),
    Many(Vec<Document>),
}

impl AddRequest {
    /// Validates a raw payload. Anything but an object or an array of objects
    /// is rejected as a whole.
    pub fn from_value(value: Value) -> Result<AddRequest> {
        match value {
            Value::Object(fields) => Ok(AddRequest::One(fields.into())),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(fields) => Ok(Document::from(fields)),
                    other => Err(Error::invalid_arg(
                        "documents",
                        format!("expected only objects, found {}", value_kind(&other)),
                    )),
                })
                .collect::<Result<Vec<_>>>()
                .map(AddRequest::Many),
            other => Err(Error::invalid_arg(
                "documents",
                format!(
                    "expected an object or an array of objects, found {}",
                    value_kind(&other)
                ),
            )),
        }
    }

    pub fn into_documents(self) -> Vec<Document> {
        match self {
            AddRequest::One(document) => vec![document],
            AddRequest::Many(documents) => documents,
        }
    }
}

/// Writes submitted documents, one pending object each.
///
/// Documents become searchable after the next rebuild.
pub struct Ingestor<'a> {
    ctx: &'a SearchContext,
}

impl<'a> Ingestor<'a> {
    pub fn new(ctx: &'a SearchContext) -> Ingestor<'a> {
        Ingestor { ctx }
    }

    /// Stores every document of `request` under its own fresh pending key and
    /// returns the keys in document order.
    pub fn add(&self, request: AddRequest) -> Result<Vec<String>> {
        let documents = request.into_documents();
        // keys are minted up front so that their order follows document order
        let items: Vec<(String, Document)> = documents
            .into_iter()
            .map(|document| (new_pending_key(), document))
            .collect();

        let store = self.ctx.store();
        let keys = data_parallel::try_map(Some(self.ctx.pool()), items, |(key, document)| {
            let bytes = serde_json::to_vec(&document).map_err(|e| Error::json(key.as_str(), e))?;
            store.put(&key, &bytes)?;
            Ok(key)
        })?;
        log::info!("uploaded {} document(s)", keys.len());
        Ok(keys)
    }

    /// Validates a raw payload and adds it.
    pub fn add_value(&self, value: Value) -> Result<Vec<String>> {
        self.add(AddRequest::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use docindex_objectstore::{json::get_json, key::PENDING_PREFIX, memory_store::MemoryObjectStore};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_add_single_and_many() {
        let store = Arc::new(MemoryObjectStore::new());
        let ctx = SearchContext::with_store(store.clone()).unwrap();
        let ingestor = Ingestor::new(&ctx);

        let keys = ingestor.add_value(json!({"title": "Heat"})).unwrap();
        assert_eq!(keys.len(), 1);
        let keys = ingestor
            .add_value(json!([{"title": "Alien"}, {"title": "Aliens"}, {"title": "Alien 3"}]))
            .unwrap();
        assert_eq!(keys.len(), 3);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));

        let listed = store.list(PENDING_PREFIX).unwrap();
        assert_eq!(listed.len(), 4);
        assert_eq!(&listed[1..], keys.as_slice());
        let last: Value = get_json(store.as_ref(), &keys[2]).unwrap();
        assert_eq!(last, json!({"title": "Alien 3"}));
    }

    #[test]
    fn test_rejects_non_objects_before_writing() {
        let store = Arc::new(MemoryObjectStore::new());
        let ctx = SearchContext::with_store(store.clone()).unwrap();
        let ingestor = Ingestor::new(&ctx);

        assert!(ingestor.add_value(json!("Heat")).is_err());
        assert!(ingestor.add_value(json!([{"title": "Heat"}, 5])).is_err());
        assert!(ingestor.add_value(json!(null)).is_err());
        assert!(store.is_empty());

        assert!(ingestor.add_value(json!([])).unwrap().is_empty());
    }
}
