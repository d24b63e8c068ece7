//! Merging of per-shard rankings.

use ahash::AHashMap;
use docindex_text_index::{SearchHit, read::rank};

/// Merges the hits of all shards into one ranking of at most `limit` hits.
///
/// A ref reported by several shards keeps its highest score.
pub fn merge(per_shard: Vec<Vec<SearchHit>>, limit: usize) -> Vec<SearchHit> {
    let mut best = AHashMap::<String, f64>::new();
    for hit in per_shard.into_iter().flatten() {
        best.entry(hit.doc_ref)
            .and_modify(|score| *score = score.max(hit.score))
            .or_insert(hit.score);
    }
    let mut hits: Vec<SearchHit> = best
        .into_iter()
        .map(|(doc_ref, score)| SearchHit::new(doc_ref, score))
        .collect();
    rank(&mut hits, limit);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(items: &[(&str, f64)]) -> Vec<SearchHit> {
        items.iter().map(|(r, s)| SearchHit::new(*r, *s)).collect()
    }

    #[test]
    fn test_merge_orders_across_shards() {
        let merged = merge(
            vec![
                hits(&[("Heat", 10.0), ("Alien", 5.0)]),
                hits(&[("The Matrix", 115.0)]),
                vec![],
            ],
            10,
        );
        assert_eq!(merged, hits(&[("The Matrix", 115.0), ("Heat", 10.0), ("Alien", 5.0)]));
    }

    #[test]
    fn test_duplicate_refs_keep_max() {
        let merged = merge(
            vec![
                hits(&[("Heat", 10.0)]),
                hits(&[("Heat", 115.0)]),
                hits(&[("Heat", 5.0)]),
            ],
            10,
        );
        assert_eq!(merged, hits(&[("Heat", 115.0)]));
    }

    #[test]
    fn test_ties_and_limit() {
        let merged = merge(
            vec![hits(&[("b", 5.0), ("c", 5.0)]), hits(&[("a", 5.0)])],
            2,
        );
        assert_eq!(merged, hits(&[("a", 5.0), ("b", 5.0)]));
        assert!(merge(vec![hits(&[("a", 1.0)])], 0).is_empty());
        assert!(merge(vec![], 10).is_empty());
    }
}
