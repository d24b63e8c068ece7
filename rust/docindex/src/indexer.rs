//! Turns one shard into an inverted index artifact.

use std::borrow::Cow;

use docindex_text_index::{InvertedIndex, InvertedIndexBuilder};

use crate::{config::IndexConfig, planner::Shard};

/// Builds the artifact of `shard` according to `config`.
///
/// The ref value is the posting key and is not tokenized in that role; it is
/// tokenized only when the ref field is also listed among the indexed fields.
/// Documents without a usable ref are skipped.
pub fn build(shard: &Shard<'_>, config: &IndexConfig) -> InvertedIndex {
    let mut builder = InvertedIndexBuilder::new(config.ref_field.clone(), config.fields.clone());
    let mut skipped = 0usize;
    for document in shard.documents {
        let Some(doc_ref) = document.ref_value(&config.ref_field) else {
            skipped += 1;
            continue;
        };
        let values: Vec<Cow<'_, str>> = config
            .fields
            .iter()
            .filter_map(|field| document.field_text(field))
            .collect();
        builder.add_document(&doc_ref, values.iter().map(|v| &**v));
    }
    if skipped > 0 {
        log::warn!(
            "index '{}' shard {}: skipped {skipped} document(s) without a usable '{}' ref",
            shard.index_name,
            shard.shard_number,
            config.ref_field
        );
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{document::Document, planner::partition};

    fn docs(values: serde_json::Value) -> Vec<Document> {
        crate::document::flatten_value(values, "test").unwrap()
    }

    #[test]
    fn test_build_shard() {
        let corpus = docs(json!([
            {"title": "The Matrix", "director": "Wachowski", "year": 1999},
            {"title": "Heat", "director": "Mann", "year": 1995, "tags": ["crime"]},
            {"director": "Nobody", "year": 2000},
        ]));
        let config = IndexConfig::new("movies", "title", &["title", "director", "year"]);
        let shards = partition("movies", &corpus, 1000).unwrap();
        let index = build(&shards[0], &config);

        assert_eq!(index.document_count, 2);
        assert_eq!(index.ref_field, "title");
        assert_eq!(index.postings("matrix").unwrap()[0].doc_ref, "The Matrix");
        assert_eq!(index.postings("1995").unwrap()[0].doc_ref, "Heat");
        assert!(index.postings("nobody").is_none());
        assert!(index.postings("crime").is_none());
    }

    #[test]
    fn test_ref_not_tokenized_unless_listed() {
        let corpus = docs(json!([{"id": "tt0133093", "title": "The Matrix"}]));
        let shards = partition("movies", &corpus, 10).unwrap();

        let index = build(&shards[0], &IndexConfig::new("movies", "id", &["title"]));
        assert!(index.postings("tt0133093").is_none());
        assert_eq!(index.postings("matrix").unwrap()[0].doc_ref, "tt0133093");

        let index = build(&shards[0], &IndexConfig::new("movies", "id", &["id", "title"]));
        assert!(index.postings("tt0133093").is_some());
    }

    #[test]
    fn test_numeric_ref() {
        let corpus = docs(json!([{"id": 42, "title": "Heat"}]));
        let shards = partition("movies", &corpus, 10).unwrap();
        let index = build(&shards[0], &IndexConfig::new("movies", "id", &["title"]));
        assert_eq!(index.postings("heat").unwrap()[0].doc_ref, "42");
    }

    #[test]
    fn test_build_is_deterministic() {
        let corpus = docs(json!([
            {"title": "Zodiac", "director": "Fincher"},
            {"title": "Alien", "director": "Scott"},
            {"title": "Se7en", "director": "Fincher"},
        ]));
        let config = IndexConfig::new("movies", "title", &["title", "director"]);
        let shards = partition("movies", &corpus, 1000).unwrap();
        let first = build(&shards[0], &config).to_bytes().unwrap();
        let second = build(&shards[0], &config).to_bytes().unwrap();
        assert_eq!(first, second);
    }
}
