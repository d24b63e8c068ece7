//! Splitting text values into terms.
//!
//! The same tokenizer runs over document fields at build time and over the
//! query at scoring time; the artifact records its name so that a scorer never
//! pairs query terms with terms produced by different rules. Terms are never
//! shortened: two words are the same term only if they are the same text.

pub mod unicode_word;

use docindex_common::{Result, error::Error};
pub use unicode_word::UnicodeWordTokenizer;

/// Extracts terms from a text value as borrowed slices of the input.
pub trait Tokenizer: Send + Sync {
    type TokenIter<'a>: Iterator<Item = &'a str>
    where
        Self: 'a;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a>;

    fn kind(&self) -> TokenizerKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// The tokenizers an artifact may be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerKind {
    /// Maximal runs of alphanumeric characters.
    UnicodeWord,
}

impl TryFrom<&str> for TokenizerKind {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "unicode-word" => Ok(TokenizerKind::UnicodeWord),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized tokenizer: {name}"),
            )),
        }
    }
}

impl TokenizerKind {
    pub const fn name(&self) -> &'static str {
        match self {
            TokenizerKind::UnicodeWord => "unicode-word",
        }
    }
}
