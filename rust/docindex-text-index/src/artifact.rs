//! The serialized inverted index artifact of one shard.
//!
//! An artifact is immutable once written. It is stored as a JSON document:
//!
//! ```json
//! {
//!   "formatVersion": 1,
//!   "refField": "title",
//!   "fields": ["title", "director", "year"],
//!   "tokenizerVersion": "unicode-word+unicode-case-insensitive",
//!   "documentCount": 1,
//!   "terms": {"matrix": [{"ref": "The Matrix", "frequency": 1}]}
//! }
//! ```
//!
//! Terms are kept in a `BTreeMap` and every postings list is sorted by ref, so
//! serializing the same index twice yields identical bytes.

use std::{collections::BTreeMap, ops::Bound};

use docindex_common::{Result, error::Error, verify_data};
use serde::{Deserialize, Serialize};

use crate::analyzer::TOKENIZER_VERSION;

/// Current version of the artifact layout.
pub const FORMAT_VERSION: u32 = 1;

/// A single posting: one document containing the term, and how often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(rename = "ref")]
    pub doc_ref: String,
    pub frequency: u32,
}

/// Term to postings mapping built from exactly one shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvertedIndex {
    pub format_version: u32,
    /// Name of the document field whose value is used as the posting ref.
    pub ref_field: String,
    /// Fields whose text was indexed.
    pub fields: Vec<String>,
    /// Analysis rules the terms were produced with.
    pub tokenizer_version: String,
    /// Number of documents indexed into this artifact.
    pub document_count: usize,
    /// Postings per term; each list is sorted by ref and has non-zero frequencies.
    pub terms: BTreeMap<String, Vec<Posting>>,
}

impl InvertedIndex {
    /// Creates an empty index for the given ref field and indexed fields.
    pub fn empty(ref_field: impl Into<String>, fields: Vec<String>) -> InvertedIndex {
        InvertedIndex {
            format_version: FORMAT_VERSION,
            ref_field: ref_field.into(),
            fields,
            tokenizer_version: TOKENIZER_VERSION.to_string(),
            document_count: 0,
            terms: BTreeMap::new(),
        }
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Postings of an exact (already folded) term.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.terms.get(term).map(Vec::as_slice)
    }

    /// All terms starting with the (already folded) `prefix`, in term order.
    pub fn terms_with_prefix<'a>(
        &'a self,
        prefix: &str,
    ) -> impl Iterator<Item = (&'a str, &'a [Posting])> {
        self.terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(term, _)| term.starts_with(prefix))
            .map(|(term, postings)| (term.as_str(), postings.as_slice()))
    }

    /// Serializes the artifact.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::json("inverted index", e))
    }

    /// Parses and validates a serialized artifact.
    pub fn from_bytes(bytes: &[u8]) -> Result<InvertedIndex> {
        let index: InvertedIndex = serde_json::from_slice(bytes)
            .map_err(|e| Error::invalid_format_msg("inverted index", e.to_string()))?;
        index.validate()?;
        Ok(index)
    }

    /// Checks the structural invariants of a loaded artifact.
    pub fn validate(&self) -> Result<()> {
        verify_data!(format_version, self.format_version == FORMAT_VERSION);
        verify_data!(ref_field, !self.ref_field.is_empty());
        for (term, postings) in &self.terms {
            verify_data!(term, !term.is_empty());
            verify_data!(postings, !postings.is_empty());
            verify_data!(
                postings,
                postings.windows(2).all(|w| w[0].doc_ref < w[1].doc_ref)
            );
            verify_data!(postings, postings.iter().all(|p| p.frequency > 0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InvertedIndex {
        let mut index = InvertedIndex::empty("title", vec!["title".into(), "year".into()]);
        index.document_count = 2;
        index.terms.insert(
            "matrix".into(),
            vec![
                Posting {
                    doc_ref: "The Matrix".into(),
                    frequency: 1,
                },
                Posting {
                    doc_ref: "The Matrix Reloaded".into(),
                    frequency: 1,
                },
            ],
        );
        index.terms.insert(
            "mars".into(),
            vec![Posting {
                doc_ref: "Mars Attacks".into(),
                frequency: 1,
            }],
        );
        index.terms.insert(
            "reloaded".into(),
            vec![Posting {
                doc_ref: "The Matrix Reloaded".into(),
                frequency: 1,
            }],
        );
        index
    }

    #[test]
    fn test_artifact_wire_format() {
        let index = sample();
        let json: serde_json::Value = serde_json::from_slice(&index.to_bytes().unwrap()).unwrap();
        assert_eq!(json["refField"], "title");
        assert_eq!(json["tokenizerVersion"], TOKENIZER_VERSION);
        assert_eq!(json["terms"]["matrix"][0]["ref"], "The Matrix");
        assert_eq!(json["terms"]["matrix"][0]["frequency"], 1);
        assert_eq!(InvertedIndex::from_bytes(&index.to_bytes().unwrap()).unwrap(), index);
    }

    #[test]
    fn test_prefix_lookup() {
        let index = sample();
        let terms: Vec<&str> = index.terms_with_prefix("ma").map(|(t, _)| t).collect();
        assert_eq!(terms, vec!["mars", "matrix"]);
        assert_eq!(index.terms_with_prefix("matrixx").count(), 0);
        assert_eq!(index.terms_with_prefix("").count(), 3);
        assert_eq!(index.postings("matrix").map(|p| p.len()), Some(2));
        assert!(index.postings("neo").is_none());
    }

    #[test]
    fn test_invalid_artifacts_rejected() {
        assert!(InvertedIndex::from_bytes(b"{\"refField\": 1}").is_err());
        assert!(InvertedIndex::from_bytes(b"not json").is_err());

        let mut unsorted = sample();
        if let Some(postings) = unsorted.terms.get_mut("matrix") {
            postings.reverse();
        }
        let bytes = unsorted.to_bytes().unwrap();
        assert!(InvertedIndex::from_bytes(&bytes).is_err());

        let mut future = sample();
        future.format_version = FORMAT_VERSION + 1;
        assert!(InvertedIndex::from_bytes(&future.to_bytes().unwrap()).is_err());
    }
}
