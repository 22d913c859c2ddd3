//! One model call's worth of work, and the per-turn retry budget
//!
//! Each attempt passes through two stages. Extraction yields an
//! [`Extracted`]; a parsed guess is then submitted to the game, yielding a
//! [`Submission`]. Recoverable failures from either stage are charged to a
//! [`TurnBudget`], which decides whether the turn may try again.

use crate::extract::{ExtractError, Extraction};
use crate::game::{GameError, GuessOutcome};

/// Outcome of running the extractor over a raw response
#[derive(Debug)]
pub enum Extracted {
    Parsed(Extraction),
    ParseFailed(ExtractError),
}

impl From<Result<Extraction, ExtractError>> for Extracted {
    fn from(result: Result<Extraction, ExtractError>) -> Self {
        match result {
            Ok(extraction) => Self::Parsed(extraction),
            Err(e) => Self::ParseFailed(e),
        }
    }
}

/// Outcome of submitting a parsed guess to the game
#[derive(Debug)]
pub enum Submission {
    /// The guess was recorded
    Accepted(GuessOutcome),
    /// Well-formed but not in the vocabulary; the word as submitted
    RejectedInvalidWord(String),
    /// Any other game error; never retried
    Rejected(GameError),
}

impl Submission {
    pub(crate) fn from_guess(word: &str, result: Result<GuessOutcome, GameError>) -> Self {
        match result {
            Ok(outcome) => Self::Accepted(outcome),
            Err(e) if e.is_vocabulary_rejection() => {
                Self::RejectedInvalidWord(word.trim().to_ascii_uppercase())
            }
            Err(e) => Self::Rejected(e),
        }
    }
}

/// Maximum attempts per failure category within one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryLimits {
    pub max_parsing_attempts: u32,
    pub max_invalid_word_attempts: u32,
}

impl Default for RetryLimits {
    fn default() -> Self {
        Self {
            max_parsing_attempts: 5,
            max_invalid_word_attempts: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetDecision {
    Retry,
    Exhausted,
}

/// Failure counters for a single turn
///
/// A fresh budget is created at the start of every turn. Each recorded
/// failure returns whether another attempt is allowed; the failure that
/// reaches the configured maximum exhausts the budget.
#[derive(Debug, Clone)]
pub struct TurnBudget {
    limits: RetryLimits,
    parse_failures: u32,
    invalid_words: u32,
    calls: u32,
}

impl TurnBudget {
    #[must_use]
    pub const fn new(limits: RetryLimits) -> Self {
        Self {
            limits,
            parse_failures: 0,
            invalid_words: 0,
            calls: 0,
        }
    }

    /// Count a model call; returns its 1-based index within the turn
    pub const fn begin_attempt(&mut self) -> u32 {
        self.calls += 1;
        self.calls
    }

    pub const fn record_parse_failure(&mut self) -> BudgetDecision {
        self.parse_failures += 1;
        Self::decide(self.parse_failures, self.limits.max_parsing_attempts)
    }

    pub const fn record_invalid_word(&mut self) -> BudgetDecision {
        self.invalid_words += 1;
        Self::decide(self.invalid_words, self.limits.max_invalid_word_attempts)
    }

    /// Invalid words seen so far this turn
    #[must_use]
    pub const fn invalid_words(&self) -> u32 {
        self.invalid_words
    }

    #[must_use]
    pub const fn parse_failures(&self) -> u32 {
        self.parse_failures
    }

    #[must_use]
    pub const fn limits(&self) -> RetryLimits {
        self.limits
    }

    const fn decide(failures: u32, max: u32) -> BudgetDecision {
        if failures < max {
            BudgetDecision::Retry
        } else {
            BudgetDecision::Exhausted
        }
    }
}
