use std::str::CharIndices;

use super::{Tokenizer, TokenizerKind};

/// Splits text into maximal runs of alphanumeric characters; every other
/// character is a boundary. Words are returned whole, whatever their length.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

pub struct WordTokenIterator<'a> {
    input: &'a str,
    char_indices: CharIndices<'a>,
}

impl<'a> Iterator for WordTokenIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let mut start = None;
        for (pos, ch) in self.char_indices.by_ref() {
            if ch.is_alphanumeric() {
                if start.is_none() {
                    start = Some(pos);
                }
            } else if let Some(start) = start {
                return Some(&self.input[start..pos]);
            }
        }
        start.map(|start| &self.input[start..])
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    type TokenIter<'a> = WordTokenIterator<'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        WordTokenIterator {
            input,
            char_indices: input.char_indices(),
        }
    }

    fn kind(&self) -> TokenizerKind {
        TokenizerKind::UnicodeWord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<&str> {
        UnicodeWordTokenizer.tokenize(input).collect()
    }

    #[test]
    fn test_unicode_word_tokenizer() {
        assert_eq!(
            words("Spider-Man: No Way Home (2021)"),
            vec!["Spider", "Man", "No", "Way", "Home", "2021"]
        );
        assert!(words("").is_empty());
        assert!(words("!@#$%^&*()").is_empty());
        assert_eq!(words("Amélie, Léon"), vec!["Amélie", "Léon"]);
        assert_eq!(words("3.14"), vec!["3", "14"]);
        assert_eq!(words("x7Gq2LmP"), vec!["x7Gq2LmP"]);
    }

    #[test]
    fn test_long_words_kept_whole() {
        let long = "a".repeat(300);
        let text = format!("{long} b");
        assert_eq!(words(&text), vec![long.as_str(), "b"]);
    }
}
