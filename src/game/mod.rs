//! Wordle game state machine
//!
//! A [`Game`] owns one puzzle: the target word, the guess history and the
//! status. Status only ever moves forward:
//!
//! ```text
//! IN_PROGRESS ──guess == target──▶ WON
//!      │
//!      └──6th guess, no win──────▶ LOST
//! ```
//!
//! Terminal games reject further guesses. The target is only revealed once
//! the game is over so it never leaks into a prompt.

pub mod target;

use crate::core::{Feedback, Word, WordError};
use crate::vocabulary::{Vocabulary, WordListError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub use target::{DailyWordSource, TargetError, VocabularyDailySource};

/// Maximum number of guesses per game
pub const MAX_GUESSES: usize = 6;

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a guess (or a game) is rejected
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Game is not in progress (status: {0})")]
    GameOver(GameStatus),

    /// Malformed guess shape; never retried
    #[error(transparent)]
    InvalidFormat(#[from] WordError),

    /// Well-formed but unknown word; the caller may retry with another word
    #[error("Guess must be a valid English word: '{0}' is not in the word list")]
    NotInVocabulary(String),

    #[error(transparent)]
    WordList(#[from] WordListError),
}

impl GameError {
    /// The guess was well-formed but is not an accepted word
    #[must_use]
    pub const fn is_vocabulary_rejection(&self) -> bool {
        matches!(self, Self::NotInVocabulary(_))
    }
}

/// Snapshot of a game: everything needed to render a prompt or a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    target_word: String,
    guesses: Vec<String>,
    guess_results: Vec<Feedback>,
    guess_reasoning: Vec<Option<String>>,
    status: GameStatus,
}

impl GameState {
    fn new(target_word: String) -> Self {
        Self {
            target_word,
            guesses: Vec::new(),
            guess_results: Vec::new(),
            guess_reasoning: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// The target word, regardless of status
    ///
    /// Use [`GameState::revealed_target`] for anything a model may see.
    #[must_use]
    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    /// The target word, only once the game is over
    #[must_use]
    pub fn revealed_target(&self) -> Option<&str> {
        self.status
            .is_terminal()
            .then_some(self.target_word.as_str())
    }

    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Feedback for each guess, parallel to [`GameState::guesses`]
    #[must_use]
    pub fn guess_results(&self) -> &[Feedback] {
        &self.guess_results
    }

    /// Optional model reasoning for each guess, parallel to [`GameState::guesses`]
    #[must_use]
    pub fn guess_reasoning(&self) -> &[Option<String>] {
        &self.guess_reasoning
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn guesses_made(&self) -> usize {
        self.guesses.len()
    }

    #[must_use]
    pub fn guesses_remaining(&self) -> usize {
        MAX_GUESSES - self.guesses.len()
    }

    #[must_use]
    pub const fn won(&self) -> bool {
        matches!(self.status, GameStatus::Won)
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Result of one accepted guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    pub guess: String,
    pub feedback: Feedback,
    pub status: GameStatus,
    pub guesses_remaining: usize,
    /// Present only when the game is over
    pub target_word: Option<String>,
}

/// A single Wordle puzzle bound to a shared vocabulary
#[derive(Debug)]
pub struct Game {
    vocabulary: Arc<Vocabulary>,
    target: Word,
    state: GameState,
}

impl Game {
    /// Start a game for `target`
    ///
    /// A target outside the vocabulary is added to it so the game stays
    /// winnable (daily answers are not always in the base list).
    ///
    /// # Errors
    ///
    /// - `GameError::InvalidFormat` if `target` is not 5 letters
    /// - `GameError::WordList` if the vocabulary cannot be loaded
    pub fn new(vocabulary: Arc<Vocabulary>, target: &str) -> Result<Self, GameError> {
        let target = Word::new(target)?;
        let game = Self {
            vocabulary,
            state: GameState::new(target.text().to_string()),
            target,
        };
        game.ensure_target_valid()?;
        Ok(game)
    }

    fn ensure_target_valid(&self) -> Result<(), WordListError> {
        if self.vocabulary.is_valid(self.target.text())? {
            log::debug!("Target word is in the word list");
        } else {
            log::warn!(
                "Target word '{}' not in valid words list, adding it to ensure winnability",
                self.target
            );
            self.vocabulary.add(self.target.text())?;
        }
        Ok(())
    }

    /// Submit a guess
    ///
    /// The raw text is trimmed and uppercased, checked for shape, then for
    /// vocabulary membership, then scored and appended to the history.
    ///
    /// # Errors
    ///
    /// - `GameError::GameOver` if the game already ended
    /// - `GameError::InvalidFormat` for a malformed guess
    /// - `GameError::NotInVocabulary` for an unknown word
    /// - `GameError::WordList` if the vocabulary cannot be loaded
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use wordle_bench::game::{Game, GameStatus};
    /// use wordle_bench::vocabulary::Vocabulary;
    ///
    /// let vocabulary = Arc::new(Vocabulary::from_words(["crane", "slate"]));
    /// let mut game = Game::new(vocabulary, "crane").unwrap();
    ///
    /// let outcome = game.make_guess("slate", None).unwrap();
    /// assert_eq!(outcome.status, GameStatus::InProgress);
    /// assert_eq!(outcome.target_word, None);
    ///
    /// let outcome = game.make_guess("CRANE", None).unwrap();
    /// assert_eq!(outcome.status, GameStatus::Won);
    /// assert_eq!(outcome.target_word.as_deref(), Some("CRANE"));
    /// ```
    pub fn make_guess(
        &mut self,
        raw: &str,
        reasoning: Option<String>,
    ) -> Result<GuessOutcome, GameError> {
        if self.state.status.is_terminal() {
            return Err(GameError::GameOver(self.state.status));
        }

        let guess = Word::new(raw)?;
        if !self.vocabulary.is_valid(guess.text())? {
            return Err(GameError::NotInVocabulary(guess.into_string()));
        }

        let feedback = Feedback::calculate(&guess, &self.target);
        let won = guess == self.target;

        self.state.guesses.push(guess.into_string());
        self.state.guess_results.push(feedback);
        self.state.guess_reasoning.push(reasoning);

        if won {
            self.state.status = GameStatus::Won;
        } else if self.state.guesses.len() >= MAX_GUESSES {
            self.state.status = GameStatus::Lost;
        }

        Ok(GuessOutcome {
            guess: self.state.guesses.last().cloned().unwrap_or_default(),
            feedback,
            status: self.state.status,
            guesses_remaining: self.state.guesses_remaining(),
            target_word: self.state.revealed_target().map(str::to_string),
        })
    }

    /// End an unfinished game as LOST; terminal games are left untouched
    pub fn forfeit(&mut self) {
        if !self.state.status.is_terminal() {
            self.state.status = GameStatus::Lost;
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.state.status
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
