use std::collections::BTreeMap;

use crate::{
    analyzer::Analyzer,
    artifact::{InvertedIndex, Posting},
};

/// Accumulates term frequencies of the documents of one shard and produces an
/// [`InvertedIndex`].
///
/// All indexed fields of a document feed one combined term space: a term found
/// in any field counts towards the same posting.
pub struct InvertedIndexBuilder {
    analyzer: Analyzer,
    ref_field: String,
    fields: Vec<String>,
    /// term -> (ref -> frequency)
    postings: BTreeMap<String, BTreeMap<String, u32>>,
    document_count: usize,
}

impl InvertedIndexBuilder {
    /// Creates a builder for an artifact keyed by `ref_field` over `fields`.
    pub fn new(ref_field: impl Into<String>, fields: Vec<String>) -> InvertedIndexBuilder {
        InvertedIndexBuilder {
            analyzer: Analyzer::standard(),
            ref_field: ref_field.into(),
            fields,
            postings: BTreeMap::new(),
            document_count: 0,
        }
    }

    /// Indexes one document.
    ///
    /// `doc_ref` is stored verbatim as the posting key; `values` are the text
    /// values of the document's indexed fields.
    pub fn add_document<'v>(&mut self, doc_ref: &str, values: impl IntoIterator<Item = &'v str>) {
        for value in values {
            for term in self.analyzer.terms(value) {
                if let Some(refs) = self.postings.get_mut(term.as_ref()) {
                    count_occurrence(refs, doc_ref);
                } else {
                    count_occurrence(self.postings.entry(term.into_owned()).or_default(), doc_ref);
                }
            }
        }
        self.document_count += 1;
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct terms seen so far.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn finish(self) -> InvertedIndex {
        let mut index = InvertedIndex::empty(self.ref_field, self.fields);
        index.tokenizer_version = self.analyzer.version();
        index.document_count = self.document_count;
        index.terms = self
            .postings
            .into_iter()
            .map(|(term, refs)| {
                let postings = refs
                    .into_iter()
                    .map(|(doc_ref, frequency)| Posting { doc_ref, frequency })
                    .collect();
                (term, postings)
            })
            .collect();
        index
    }
}

fn count_occurrence(refs: &mut BTreeMap<String, u32>, doc_ref: &str) {
    match refs.get_mut(doc_ref) {
        Some(frequency) => *frequency = frequency.saturating_add(1),
        None => {
            refs.insert(doc_ref.to_string(), 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<String> {
        vec!["title".into(), "director".into(), "year".into()]
    }

    #[test]
    fn test_build_combined_term_space() {
        let mut builder = InvertedIndexBuilder::new("title", fields());
        builder.add_document("The Matrix", ["The Matrix", "Wachowski", "1999"]);
        builder.add_document("Matrix of Matrices", ["Matrix of Matrices", "Nobody", "2001"]);
        assert_eq!(builder.document_count(), 2);
        let index = builder.finish();

        assert_eq!(index.document_count, 2);
        assert_eq!(index.ref_field, "title");
        let matrix = index.postings("matrix").unwrap();
        assert_eq!(
            matrix,
            &[
                Posting {
                    doc_ref: "Matrix of Matrices".into(),
                    frequency: 1
                },
                Posting {
                    doc_ref: "The Matrix".into(),
                    frequency: 1
                },
            ]
        );
        assert_eq!(index.postings("wachowski").unwrap()[0].doc_ref, "The Matrix");
        assert_eq!(index.postings("1999").unwrap().len(), 1);
        assert!(index.postings("Matrix").is_none());
        index.validate().unwrap();
    }

    #[test]
    fn test_term_frequency_counts_every_occurrence() {
        let mut builder = InvertedIndexBuilder::new("id", vec!["title".into(), "tagline".into()]);
        builder.add_document("42", ["Run Lola Run", "run, lola, RUN!"]);
        let index = builder.finish();
        assert_eq!(index.postings("run").unwrap()[0].frequency, 4);
        assert_eq!(index.postings("lola").unwrap()[0].frequency, 2);
    }

    #[test]
    fn test_build_is_deterministic() {
        let build = || {
            let mut builder = InvertedIndexBuilder::new("title", fields());
            for (title, director, year) in [
                ("Zodiac", "Fincher", "2007"),
                ("Alien", "Scott", "1979"),
                ("Se7en", "Fincher", "1995"),
            ] {
                builder.add_document(title, [title, director, year]);
            }
            builder.finish().to_bytes().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_empty_values() {
        let mut builder = InvertedIndexBuilder::new("title", fields());
        builder.add_document("--", ["--", "", "  "]);
        let index = builder.finish();
        assert_eq!(index.document_count, 1);
        assert_eq!(index.term_count(), 0);
    }
}
