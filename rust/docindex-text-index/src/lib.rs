//! Inverted text index implementation.
//!
//! This crate turns the text of a bounded set of documents (one shard) into an
//! inverted index artifact, and scores free-text queries against such an
//! artifact.
//!
//! # Overview
//!
//! - **Tokenizers** break text into terms; the same tokenizer is applied at index
//!   time and to the query.
//! - **Collation** folds terms to their canonical (lowercase) form.
//! - **Builder** ([`InvertedIndexBuilder`]) accumulates per-document term
//!   frequencies and produces an [`InvertedIndex`].
//! - **Scorer** ([`ShardScorer`]) runs the three-tier (exact, prefix, fuzzy)
//!   boosted match against one artifact and returns ranked [`SearchHit`]s.
//!
//! # Quick Start
//!
//! ```rust
//! use docindex_text_index::{InvertedIndexBuilder, ShardScorer};
//!
//! let mut builder = InvertedIndexBuilder::new("title", vec!["title".to_string()]);
//! builder.add_document("The Matrix", ["The Matrix"]);
//! let index = builder.finish();
//!
//! let hits = ShardScorer::new(&index).unwrap().score("matrix", 10);
//! assert_eq!(hits[0].doc_ref, "The Matrix");
//! ```

pub mod analyzer;
pub mod artifact;
pub mod collation;
pub mod read;
mod tokenizers;
pub mod write;

pub use analyzer::{Analyzer, TOKENIZER_VERSION};
pub use artifact::{InvertedIndex, Posting};
pub use read::{SearchHit, edit_distance, scorer::ShardScorer};
pub use tokenizers::{Tokenizer, TokenizerKind, UnicodeWordTokenizer};
pub use write::builder::InvertedIndexBuilder;
