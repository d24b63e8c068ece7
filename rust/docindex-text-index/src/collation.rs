//! Text collation strategies for term comparison and case folding.
//!
//! The collation decides which spellings of a term are considered equal. It
//! is applied to every term at index time and to the query at scoring time, so
//! the same collation must be used on both sides; the artifact records its name.

use std::borrow::Cow;

use docindex_common::{Result, error::Error};

/// Trait defining the folding rules for text terms.
pub trait Collation: Send + Sync + 'static {
    /// Returns the collation kind for identification and configuration.
    fn kind(&self) -> CollationKind;

    /// Returns the human-readable name of this collation strategy.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Folds a term into its canonical form. Terms that are already canonical
    /// are returned borrowed.
    fn fold<'a>(&self, term: &'a str) -> Cow<'a, str>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CollationKind {
    /// Unicode collation that is case insensitive.
    UnicodeCaseInsensitive,
}

impl TryFrom<&str> for CollationKind {
    type Error = docindex_common::error::Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "unicode-case-insensitive" => Ok(CollationKind::UnicodeCaseInsensitive),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized collation: {name}"),
            )),
        }
    }
}

impl CollationKind {
    pub const fn name(&self) -> &'static str {
        match self {
            CollationKind::UnicodeCaseInsensitive => "unicode-case-insensitive",
        }
    }
}

/// Creates a new collation instance based on the provided name.
pub fn create_collation(name: &str) -> Result<Box<dyn Collation>> {
    match CollationKind::try_from(name)? {
        CollationKind::UnicodeCaseInsensitive => Ok(Box::new(UnicodeCaseInsensitiveCollation)),
    }
}

/// Unicode case-insensitive collation: terms are folded to lowercase using the
/// full Unicode lowercase mapping.
pub struct UnicodeCaseInsensitiveCollation;

impl Collation for UnicodeCaseInsensitiveCollation {
    fn kind(&self) -> CollationKind {
        CollationKind::UnicodeCaseInsensitive
    }

    fn fold<'a>(&self, term: &'a str) -> Cow<'a, str> {
        if term.chars().any(|c| c.to_lowercase().ne(std::iter::once(c))) {
            Cow::Owned(term.to_lowercase())
        } else {
            Cow::Borrowed(term)
        }
    }
}
