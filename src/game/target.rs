//! Daily target sources
//!
//! When no explicit target word is given, a session asks a
//! [`DailyWordSource`] for the puzzle of a given date. The official puzzle
//! feed is an HTTP service and lives outside this crate; the source provided
//! here picks a word from the vocabulary deterministically per date, so an
//! offline run for the same date always plays the same puzzle.

use crate::vocabulary::{Vocabulary, WordListError};
use chrono::{Datelike, NaiveDate};
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Failed to fetch Wordle solution for {date}: {reason}")]
    Fetch { date: NaiveDate, reason: String },

    #[error("No solution available for {0}")]
    NoSolution(NaiveDate),

    #[error(transparent)]
    WordList(#[from] WordListError),
}

/// Provides the solution word for a calendar date
pub trait DailyWordSource: Send + Sync {
    /// Solution for `date`, as returned by the source (case is normalized later)
    ///
    /// # Errors
    ///
    /// Returns `TargetError` if no solution can be produced for `date`.
    fn solution_for(&self, date: NaiveDate) -> Result<String, TargetError>;
}

impl<F> DailyWordSource for F
where
    F: Fn(NaiveDate) -> Result<String, TargetError> + Send + Sync,
{
    fn solution_for(&self, date: NaiveDate) -> Result<String, TargetError> {
        self(date)
    }
}

/// Offline daily puzzle: a seeded pick from the vocabulary
#[derive(Debug, Clone)]
pub struct VocabularyDailySource {
    vocabulary: Arc<Vocabulary>,
}

impl VocabularyDailySource {
    #[must_use]
    pub const fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }
}

impl DailyWordSource for VocabularyDailySource {
    fn solution_for(&self, date: NaiveDate) -> Result<String, TargetError> {
        let words = self.vocabulary.words()?;
        let mut rng = StdRng::seed_from_u64(u64::from(date.num_days_from_ce().unsigned_abs()));
        words
            .choose(&mut rng)
            .cloned()
            .ok_or(TargetError::NoSolution(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn vocabulary_source_is_deterministic_per_date() {
        let vocabulary = Arc::new(Vocabulary::from_words([
            "crane", "slate", "irate", "crate", "grate", "trace",
        ]));
        let source = VocabularyDailySource::new(Arc::clone(&vocabulary));

        let first = source.solution_for(date(2025, 7, 1)).unwrap();
        let again = source.solution_for(date(2025, 7, 1)).unwrap();
        assert_eq!(first, again);
        assert!(vocabulary.is_valid(&first).unwrap());
    }

    #[test]
    fn empty_vocabulary_has_no_solution() {
        let source = VocabularyDailySource::new(Arc::new(Vocabulary::from_words(Vec::<String>::new())));
        assert!(matches!(
            source.solution_for(date(2025, 7, 1)),
            Err(TargetError::NoSolution(_))
        ));
    }

    #[test]
    fn closures_are_sources() {
        let source = |d: NaiveDate| {
            if d.day() == 1 {
                Ok("crane".to_string())
            } else {
                Err(TargetError::Fetch {
                    date: d,
                    reason: "404".into(),
                })
            }
        };
        assert_eq!(source.solution_for(date(2025, 7, 1)).unwrap(), "crane");
        assert!(source.solution_for(date(2025, 7, 2)).is_err());
    }
}
