//! Accepted guess vocabulary
//!
//! The vocabulary is the union of an immutable base word list and an
//! append-only log of words added at runtime (for example a daily target that
//! the base list does not know). It is loaded lazily on first use.
//!
//! A `Vocabulary` is meant to be shared: wrap it in an `Arc` and hand the same
//! instance to every game session. Additions made by one session are visible
//! to all others. Mutation is guarded by an internal mutex, so sessions on
//! different threads can share one instance.

pub mod loader;

use crate::core::{Word, WordError};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Errors raised while loading or extending the vocabulary
#[derive(Debug, Error)]
pub enum WordListError {
    #[error("Word list file not found: {}", .0.display())]
    BaseFileNotFound(PathBuf),

    #[error("No valid words found in {}", .0.display())]
    Empty(PathBuf),

    #[error("Error loading word list from '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid word format: '{word}' ({source})")]
    InvalidFormat {
        word: String,
        #[source]
        source: WordError,
    },
}

#[derive(Debug)]
enum Backing {
    Files { base: PathBuf, log: PathBuf },
    Memory,
}

/// Shared set of accepted 5-letter words
#[derive(Debug)]
pub struct Vocabulary {
    backing: Backing,
    words: Mutex<Option<FxHashSet<String>>>,
}

impl Vocabulary {
    /// Create a file-backed vocabulary; nothing is read until first use
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            backing: Backing::Files {
                base: base_path.into(),
                log: log_path.into(),
            },
            words: Mutex::new(None),
        }
    }

    /// Create an in-memory vocabulary with no backing files
    ///
    /// Entries that are not 5 letters are skipped. Additions are kept in
    /// memory only.
    ///
    /// # Examples
    /// ```
    /// use wordle_bench::vocabulary::Vocabulary;
    ///
    /// let vocabulary = Vocabulary::from_words(["crane", "slate", "nope"]);
    /// assert_eq!(vocabulary.len().unwrap(), 2);
    /// assert!(vocabulary.is_valid("Crane").unwrap());
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| Word::new(w).ok())
            .map(Word::into_string)
            .collect();
        Self {
            backing: Backing::Memory,
            words: Mutex::new(Some(words)),
        }
    }

    /// Path of the addition log, if file-backed
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::Files { log, .. } => Some(log),
            Backing::Memory => None,
        }
    }

    /// Force the lazy load and return the number of words
    ///
    /// # Errors
    ///
    /// Returns `WordListError` if the base list is missing, unreadable or empty.
    pub fn load(&self) -> Result<usize, WordListError> {
        self.len()
    }

    /// Case-insensitive membership test
    ///
    /// # Errors
    ///
    /// Only fails if the lazy load fails.
    pub fn is_valid(&self, word: &str) -> Result<bool, WordListError> {
        let word = word.trim().to_ascii_uppercase();
        Ok(self.loaded()?.as_ref().is_some_and(|w| w.contains(&word)))
    }

    /// Add a word, logging it to the addition log
    ///
    /// Returns `true` if the word was new. Adding a known word is a no-op and
    /// does not touch the log. A failed log write is reported at error level
    /// but the word remains usable in memory.
    ///
    /// # Errors
    ///
    /// Returns `WordListError::InvalidFormat` if `word` is not 5 letters, or
    /// any lazy-load error.
    pub fn add(&self, word: &str) -> Result<bool, WordListError> {
        let word = Word::new(word).map_err(|source| WordListError::InvalidFormat {
            word: word.to_string(),
            source,
        })?;

        let mut guard = self.loaded()?;
        let Some(words) = guard.as_mut() else {
            return Ok(false);
        };
        if !words.insert(word.text().to_string()) {
            return Ok(false);
        }

        if let Some(log_path) = self.log_path()
            && let Err(e) = loader::append_to_log(log_path, word.text())
        {
            log::error!(
                "Could not log added word to {}: {e}",
                log_path.display()
            );
        }
        log::info!("Added new word '{word}' to valid words list");
        Ok(true)
    }

    /// Number of accepted words
    ///
    /// # Errors
    ///
    /// Only fails if the lazy load fails.
    pub fn len(&self) -> Result<usize, WordListError> {
        Ok(self.loaded()?.as_ref().map_or(0, FxHashSet::len))
    }

    /// Whether the vocabulary holds no words (never true once loaded from files)
    ///
    /// # Errors
    ///
    /// Only fails if the lazy load fails.
    pub fn is_empty(&self) -> Result<bool, WordListError> {
        Ok(self.len()? == 0)
    }

    /// Sorted snapshot of every accepted word
    ///
    /// # Errors
    ///
    /// Only fails if the lazy load fails.
    pub fn words(&self) -> Result<Vec<String>, WordListError> {
        let guard = self.loaded()?;
        let mut words: Vec<String> = guard
            .as_ref()
            .map(|w| w.iter().cloned().collect())
            .unwrap_or_default();
        words.sort_unstable();
        Ok(words)
    }

    /// Lock the word set, loading it first if needed
    fn loaded(&self) -> Result<MutexGuard<'_, Option<FxHashSet<String>>>, WordListError> {
        let mut guard = self.words.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none()
            && let Backing::Files { base, log } = &self.backing
        {
            log::info!("Loading valid words from {}", base.display());
            let mut words = loader::load_base_list(base)?;
            let added = loader::load_addition_log(log);
            log::debug!(
                "Loaded {} base words and {} added words",
                words.len(),
                added.len()
            );
            words.extend(added);
            *guard = Some(words);
        }
        Ok(guard)
    }
}
