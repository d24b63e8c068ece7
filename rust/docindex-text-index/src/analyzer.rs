//! Text analysis shared by the index builder and the scorer.

use std::borrow::Cow;

use docindex_common::{Result, error::Error};

use crate::{
    collation::{self, Collation},
    tokenizers::{Tokenizer, TokenizerKind, UnicodeWordTokenizer},
};

/// Tokenizer used for document fields and the exact query tier.
pub const DEFAULT_TOKENIZER: &str = "unicode-word";

/// Collation applied to every term.
pub const DEFAULT_COLLATION: &str = "unicode-case-insensitive";

/// Identifies the analysis rules an artifact was built with. A scorer refuses
/// artifacts built with rules it does not know, since their terms would not
/// line up with the query terms.
pub const TOKENIZER_VERSION: &str = "unicode-word+unicode-case-insensitive";

/// Tokenizer plus collation: turns text into the canonical terms stored in
/// (and looked up from) an inverted index.
pub struct Analyzer {
    tokenizer: UnicodeWordTokenizer,
    collation: Box<dyn Collation>,
}

impl Analyzer {
    pub fn new(tokenizer: &str, collation: &str) -> Result<Analyzer> {
        match TokenizerKind::try_from(tokenizer)? {
            TokenizerKind::UnicodeWord => Ok(Analyzer {
                tokenizer: UnicodeWordTokenizer,
                collation: collation::create_collation(collation)?,
            }),
        }
    }

    /// The analyzer every new artifact is built with.
    pub fn standard() -> Analyzer {
        Analyzer {
            tokenizer: UnicodeWordTokenizer,
            collation: Box::new(collation::UnicodeCaseInsensitiveCollation),
        }
    }

    /// Recreates the analyzer from a recorded `tokenizer+collation` version string.
    pub fn from_version(version: &str) -> Result<Analyzer> {
        let (tokenizer, collation) = version.split_once('+').ok_or_else(|| {
            Error::invalid_format_msg("tokenizerVersion", format!("unknown version '{version}'"))
        })?;
        Analyzer::new(tokenizer, collation).map_err(|e| {
            Error::invalid_format_msg("tokenizerVersion", format!("'{version}': {e}"))
        })
    }

    pub fn version(&self) -> String {
        format!("{}+{}", self.tokenizer.name(), self.collation.name())
    }

    /// Splits `text` into folded terms.
    pub fn terms<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Cow<'a, str>> + 'a {
        self.tokenizer
            .tokenize(text)
            .map(|term| self.collation.fold(term))
    }

    /// Folds `text` as a single, unsplit term with surrounding whitespace
    /// removed. Returns `None` for blank input.
    pub fn whole_term(&self, text: &str) -> Option<String> {
        let text = text.trim();
        (!text.is_empty()).then(|| self.collation.fold(text).into_owned())
    }
}
