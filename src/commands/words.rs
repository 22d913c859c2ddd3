//! Vocabulary maintenance command

use crate::vocabulary::{Vocabulary, WordListError};

/// What happened to one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordStatus {
    Added,
    AlreadyPresent,
    Valid,
    Unknown,
    /// Not a 5-letter word; carries the reason
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordReport {
    pub word: String,
    pub status: WordStatus,
}

/// Add each word to the vocabulary (and its addition log)
///
/// # Errors
///
/// Returns an error only if the vocabulary cannot be loaded.
pub fn add_words(vocabulary: &Vocabulary, words: &[String]) -> Result<Vec<WordReport>, WordListError> {
    words
        .iter()
        .map(|word| {
            let status = match vocabulary.add(word) {
                Ok(true) => WordStatus::Added,
                Ok(false) => WordStatus::AlreadyPresent,
                Err(e @ WordListError::InvalidFormat { .. }) => WordStatus::Rejected(e.to_string()),
                Err(e) => return Err(e),
            };
            Ok(WordReport {
                word: word.trim().to_ascii_uppercase(),
                status,
            })
        })
        .collect()
}

/// Check each word against the vocabulary
///
/// # Errors
///
/// Returns an error only if the vocabulary cannot be loaded.
pub fn check_words(vocabulary: &Vocabulary, words: &[String]) -> Result<Vec<WordReport>, WordListError> {
    words
        .iter()
        .map(|word| {
            let status = if vocabulary.is_valid(word)? {
                WordStatus::Valid
            } else {
                WordStatus::Unknown
            };
            Ok(WordReport {
                word: word.trim().to_ascii_uppercase(),
                status,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn add_reports_each_word() {
        let vocabulary = Vocabulary::from_words(["crane"]);
        let reports = add_words(&vocabulary, &strings(&["crane", "mango", "toolong"])).unwrap();

        assert_eq!(reports[0].status, WordStatus::AlreadyPresent);
        assert_eq!(reports[1].status, WordStatus::Added);
        assert_eq!(reports[1].word, "MANGO");
        assert!(matches!(reports[2].status, WordStatus::Rejected(_)));
        assert!(vocabulary.is_valid("mango").unwrap());
    }

    #[test]
    fn check_does_not_modify() {
        let vocabulary = Vocabulary::from_words(["crane"]);
        let reports = check_words(&vocabulary, &strings(&["Crane", "mango"])).unwrap();

        assert_eq!(reports[0].status, WordStatus::Valid);
        assert_eq!(reports[1].status, WordStatus::Unknown);
        assert_eq!(vocabulary.len().unwrap(), 1);
    }

    #[test]
    fn missing_base_list_is_an_error() {
        let dir = std::env::temp_dir().join(format!("wordle_bench_words_{}", uuid::Uuid::new_v4()));
        let vocabulary = Vocabulary::new(dir.join("missing.txt"), dir.join("added.log"));
        assert!(matches!(
            check_words(&vocabulary, &strings(&["crane"])),
            Err(WordListError::BaseFileNotFound(_))
        ));
    }
}
