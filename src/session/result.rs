//! Records produced by a session
//!
//! Everything here serializes with serde so a sink can persist it as-is.

use crate::game::{GameState, GameStatus};
use crate::model::UsageStats;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A well-formed guess the vocabulary rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidAttempt {
    pub word: String,
    pub turn_number: usize,
    /// 1-based index among this turn's invalid words
    pub attempt_number: u32,
    pub created_at: DateTime<Local>,
}

impl InvalidAttempt {
    #[must_use]
    pub fn new(word: String, turn_number: usize, attempt_number: u32) -> Self {
        Self {
            word,
            turn_number,
            attempt_number,
            created_at: Local::now(),
        }
    }
}

/// One model call: what was asked, what came back, and what became of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub turn_number: usize,
    /// 1-based model call index within the turn
    pub attempt_number: u32,
    pub prompt_text: String,
    pub raw_response: String,
    pub parse_success: bool,
    pub parse_error_message: Option<String>,
    /// The extracted guess was recorded by the game
    pub accepted: bool,
    pub usage: Option<UsageStats>,
    pub created_at: DateTime<Local>,
}

impl InteractionRecord {
    #[must_use]
    pub fn new(
        turn_number: usize,
        attempt_number: u32,
        prompt_text: String,
        raw_response: String,
        usage: Option<UsageStats>,
    ) -> Self {
        Self {
            turn_number,
            attempt_number,
            prompt_text,
            raw_response,
            parse_success: false,
            parse_error_message: None,
            accepted: false,
            usage,
            created_at: Local::now(),
        }
    }
}

/// Usage aggregated over every model call of a game
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total_requests: u32,
    pub total_prompt_tokens: u64,
    pub total_completion_tokens: u64,
    pub total_reasoning_tokens: u64,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
    pub avg_latency_ms: f64,
}

impl UsageSummary {
    pub fn record(&mut self, usage: &UsageStats) {
        let previous = f64::from(self.total_requests);
        self.total_requests += 1;
        self.total_prompt_tokens += u64::from(usage.prompt_tokens);
        self.total_completion_tokens += u64::from(usage.completion_tokens);
        self.total_reasoning_tokens += u64::from(usage.reasoning_tokens);
        self.total_tokens += u64::from(usage.total_tokens);
        self.total_cost_usd += usage.cost_usd;
        #[allow(clippy::cast_precision_loss)]
        let latency = usage.latency_ms as f64;
        self.avg_latency_ms =
            self.avg_latency_ms.mul_add(previous, latency) / f64::from(self.total_requests);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub model: String,
    pub template: String,
    pub parser: String,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub duration_seconds: f64,
    /// Puzzle date
    pub date: NaiveDate,
    /// Every rejected word of the game, in order
    pub invalid_word_attempts: Vec<String>,
    pub total_invalid_attempts: usize,
    pub usage_stats: Option<UsageSummary>,
}

/// Outcome of a whole session
///
/// `success` means the game ran to completion, won or lost. A failed session
/// carries an error message and, when the game got started, its state
/// forfeited to LOST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub success: bool,
    pub game_state: Option<GameState>,
    pub metadata: GameMetadata,
    /// Lower is better; only for completed games
    pub golf_score: Option<i32>,
    pub error: Option<String>,
}

impl GameResult {
    #[must_use]
    pub fn won(&self) -> bool {
        self.game_state.as_ref().is_some_and(GameState::won)
    }

    #[must_use]
    pub fn guesses_made(&self) -> usize {
        self.game_state.as_ref().map_or(0, GameState::guesses_made)
    }

    #[must_use]
    pub fn target_word(&self) -> Option<&str> {
        self.game_state.as_ref().map(GameState::target_word)
    }
}

/// Golf score of a finished game: a win in N guesses scores `N - 4`, a loss `+4`
///
/// # Examples
/// ```
/// use wordle_bench::game::GameStatus;
/// use wordle_bench::session::golf_score;
///
/// assert_eq!(golf_score(GameStatus::Won, 1), Some(-3));
/// assert_eq!(golf_score(GameStatus::Won, 4), Some(0));
/// assert_eq!(golf_score(GameStatus::Lost, 6), Some(4));
/// assert_eq!(golf_score(GameStatus::InProgress, 2), None);
/// ```
#[must_use]
pub fn golf_score(status: GameStatus, guesses_made: usize) -> Option<i32> {
    match status {
        GameStatus::Won => i32::try_from(guesses_made).ok().map(|n| n - 4),
        GameStatus::Lost => Some(4),
        GameStatus::InProgress => None,
    }
}
