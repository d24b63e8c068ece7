//! Three-tier boosted matching against a single shard artifact.
//!
//! A query is matched three ways, and the contributions add up per document:
//!
//! | tier   | query form                       | term matches when          | contribution |
//! |--------|----------------------------------|----------------------------|--------------|
//! | exact  | tokenized like document fields   | the document has all terms | `100 × tf`   |
//! | prefix | whole query, folded, not split   | term starts with the query | `10 × tf`    |
//! | fuzzy  | whole query, folded, not split   | edit distance ≤ 2          | `5 × tf`     |
//!
//! The prefix and fuzzy tiers see the query as one term, so a multi-word query
//! only reaches them if the index happens to contain a term with a space, which
//! the word tokenizer never produces.

use ahash::AHashMap;
use docindex_common::Result;

use crate::{
    analyzer::Analyzer,
    artifact::{InvertedIndex, Posting},
    read::{SearchHit, edit_distance::BoundedLevenshtein, rank},
};

pub const EXACT_BOOST: f64 = 100.0;
pub const PREFIX_BOOST: f64 = 10.0;
pub const FUZZY_BOOST: f64 = 5.0;

/// Largest edit distance accepted by the fuzzy tier.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Scores queries against one loaded [`InvertedIndex`].
pub struct ShardScorer<'a> {
    index: &'a InvertedIndex,
    analyzer: Analyzer,
}

impl<'a> ShardScorer<'a> {
    /// Creates a scorer using the analysis rules recorded in the artifact.
    pub fn new(index: &'a InvertedIndex) -> Result<ShardScorer<'a>> {
        let analyzer = Analyzer::from_version(&index.tokenizer_version)?;
        Ok(ShardScorer { index, analyzer })
    }

    /// Returns up to `limit` hits of this shard in ranking order.
    pub fn score(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let mut query_terms: Vec<String> = self
            .analyzer
            .terms(query)
            .map(|term| term.into_owned())
            .collect();
        if query_terms.is_empty() || limit == 0 {
            return Vec::new();
        }
        query_terms.sort_unstable();
        query_terms.dedup();

        let mut scores = AHashMap::<&'a str, f64>::new();
        self.exact_tier(&query_terms, &mut scores);
        if let Some(whole) = self.analyzer.whole_term(query) {
            self.prefix_tier(&whole, &mut scores);
            let mut fuzzy = BoundedLevenshtein::new(&whole, MAX_EDIT_DISTANCE);
            self.fuzzy_tier(&mut fuzzy, &mut scores);
        }

        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .map(|(doc_ref, score)| SearchHit::new(doc_ref, score))
            .collect();
        rank(&mut hits, limit);
        log::trace!(
            "query '{query}' matched {} documents in a shard of {}",
            hits.len(),
            self.index.document_count
        );
        hits
    }

    fn exact_tier(&self, terms: &[String], scores: &mut AHashMap<&'a str, f64>) {
        let Some(mut lists) = terms
            .iter()
            .map(|term| self.index.postings(term))
            .collect::<Option<Vec<&'a [Posting]>>>()
        else {
            return;
        };
        lists.sort_unstable_by_key(|postings| postings.len());
        let Some((driver, rest)) = lists.split_first() else {
            return;
        };

        'docs: for posting in *driver {
            let mut frequency = posting.frequency;
            for other in rest {
                match other.binary_search_by(|p| p.doc_ref.as_str().cmp(&posting.doc_ref)) {
                    Ok(pos) => frequency += other[pos].frequency,
                    Err(_) => continue 'docs,
                }
            }
            *scores.entry(posting.doc_ref.as_str()).or_default() +=
                EXACT_BOOST * f64::from(frequency);
        }
    }

    fn prefix_tier(&self, prefix: &str, scores: &mut AHashMap<&'a str, f64>) {
        for (_, postings) in self.index.terms_with_prefix(prefix) {
            accumulate(postings, PREFIX_BOOST, scores);
        }
    }

    fn fuzzy_tier(&self, query: &mut BoundedLevenshtein, scores: &mut AHashMap<&'a str, f64>) {
        for (term, postings) in &self.index.terms {
            if query.distance(term).is_some() {
                accumulate(postings, FUZZY_BOOST, scores);
            }
        }
    }
}

fn accumulate<'a>(postings: &'a [Posting], boost: f64, scores: &mut AHashMap<&'a str, f64>) {
    for posting in postings {
        *scores.entry(posting.doc_ref.as_str()).or_default() +=
            boost * f64::from(posting.frequency);
    }
}
