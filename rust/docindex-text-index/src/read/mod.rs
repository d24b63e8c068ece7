//! Query-time access to inverted index artifacts.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub mod edit_distance;
pub mod scorer;

/// A scored document reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "ref")]
    pub doc_ref: String,
    pub score: f64,
}

impl SearchHit {
    pub fn new(doc_ref: impl Into<String>, score: f64) -> SearchHit {
        SearchHit {
            doc_ref: doc_ref.into(),
            score,
        }
    }

    /// Ranking order: descending score, ties broken by ascending ref.
    pub fn rank_cmp(&self, other: &SearchHit) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_ref.cmp(&other.doc_ref))
    }
}

/// Sorts hits into ranking order and keeps the best `limit`.
pub fn rank(hits: &mut Vec<SearchHit>, limit: usize) {
    hits.sort_unstable_by(SearchHit::rank_cmp);
    hits.truncate(limit);
}
