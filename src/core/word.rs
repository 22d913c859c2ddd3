//! Wordle word representation
//!
//! A Word is a validated, canonical (uppercase) 5-letter ASCII word.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Number of letters in every Wordle word
pub const WORD_LENGTH: usize = 5;

/// A validated 5-letter Wordle word, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    letters: [u8; WORD_LENGTH],
}

/// Shape errors for a candidate word
///
/// These describe a malformed guess, never an unknown one. Vocabulary
/// membership is checked separately by the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Guess must be a {WORD_LENGTH}-letter word, got {0} characters")]
    InvalidLength(usize),

    #[error("Guess must only contain alphabetical characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Surrounding whitespace is trimmed and the text is normalized to uppercase.
    ///
    /// # Errors
    /// Returns `WordError` if the trimmed text is not exactly 5 ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_bench::core::Word;
    ///
    /// let word = Word::new(" crane ").unwrap();
    /// assert_eq!(word.text(), "CRANE");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let trimmed = text.as_ref().trim();

        let length = trimmed.chars().count();
        if length != WORD_LENGTH {
            return Err(WordError::InvalidLength(length));
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(WordError::InvalidCharacters);
        }

        let text = trimmed.to_ascii_uppercase();
        let mut letters = [0u8; WORD_LENGTH];
        letters.copy_from_slice(text.as_bytes());

        Ok(Self { text, letters })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as an uppercase byte array
    #[inline]
    #[must_use]
    pub const fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.letters
    }

    /// Count occurrences of each letter
    ///
    /// Used by scoring to hand out each target letter at most once.
    #[must_use]
    pub fn letter_counts(&self) -> FxHashMap<u8, u8> {
        let mut counts = FxHashMap::default();
        for &ch in &self.letters {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }

    /// Consume the word, returning its canonical text
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Check the generic shape rule without allocating a `Word`
#[must_use]
pub fn is_valid_format(text: &str) -> bool {
    text.chars().count() == WORD_LENGTH && text.chars().all(|c| c.is_ascii_alphabetic())
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_valid() {
        let word = Word::new("CRANE").unwrap();
        assert_eq!(word.text(), "CRANE");
        assert_eq!(word.letters(), b"CRANE");
    }

    #[test]
    fn word_creation_normalizes_case_and_whitespace() {
        assert_eq!(Word::new("crane").unwrap().text(), "CRANE");
        assert_eq!(Word::new("CrAnE").unwrap().text(), "CRANE");
        assert_eq!(Word::new("  slate\n").unwrap().text(), "SLATE");
    }

    #[test]
    fn word_creation_invalid_length() {
        assert_eq!(Word::new("too long"), Err(WordError::InvalidLength(8)));
        assert_eq!(Word::new("shrt"), Err(WordError::InvalidLength(4)));
        assert_eq!(Word::new(""), Err(WordError::InvalidLength(0)));
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert_eq!(Word::new("cran3"), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cr ne"), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cran!"), Err(WordError::InvalidCharacters));
        // Non-ASCII letters are counted as characters, not bytes
        assert_eq!(Word::new("caféé"), Err(WordError::InvalidCharacters));
    }

    #[test]
    fn word_letter_counts_duplicates() {
        let counts = Word::new("speed").unwrap().letter_counts();
        assert_eq!(counts.get(&b'S'), Some(&1));
        assert_eq!(counts.get(&b'E'), Some(&2));
        assert_eq!(counts.get(&b'D'), Some(&1));
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn format_check_matches_constructor() {
        for text in ["CRANE", "crane", "cran3", "four", "sixsix", ""] {
            assert_eq!(is_valid_format(text), Word::new(text).is_ok(), "{text}");
        }
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            WordError::InvalidLength(3).to_string(),
            "Guess must be a 5-letter word, got 3 characters"
        );
        assert_eq!(
            WordError::InvalidCharacters.to_string(),
            "Guess must only contain alphabetical characters"
        );
    }
}
