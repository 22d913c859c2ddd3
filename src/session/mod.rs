//! Game sessions: one model playing one puzzle end to end
//!
//! A [`GameSession`] resolves the target, then runs up to six turns. Each
//! turn renders a prompt, asks the model, extracts a guess and submits it,
//! retrying within two per-turn budgets:
//!
//! - unparseable responses (`max_parsing_attempts`)
//! - well-formed words outside the vocabulary (`max_invalid_word_attempts`)
//!
//! Rejected words accumulate over the whole game and are listed back to the
//! model in every later prompt. Any other failure ends the game. Whatever
//! happens, [`GameSession::run`] returns a [`GameResult`] and hands it to the
//! configured sink.

mod attempt;
mod result;
mod sink;

pub use attempt::{BudgetDecision, Extracted, RetryLimits, Submission, TurnBudget};
pub use result::{
    GameMetadata, GameResult, InteractionRecord, InvalidAttempt, UsageSummary, golf_score,
};
pub use sink::{JsonlSink, MemorySink, ResultSink, SinkError, StoredGame};

use crate::extract::{ExtractError, Extraction, ResponseExtractor};
use crate::game::{
    DailyWordSource, Game, GameError, GameState, GuessOutcome, MAX_GUESSES, TargetError,
};
use crate::model::{ModelClient, ModelError};
use crate::prompt::PromptBuilder;
use crate::vocabulary::Vocabulary;
use chrono::{DateTime, Local, NaiveDate};
use std::sync::Arc;
use thiserror::Error;

/// Errors that end a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No target word given and no daily word source configured")]
    NoTarget,

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Could not parse valid guess from LLM response after {attempts} attempts: {last_error}")]
    ParseBudgetExhausted {
        attempts: u32,
        #[source]
        last_error: ExtractError,
    },

    #[error("Could not get valid word from LLM after {attempts} attempts. Invalid words tried: {}", .words.join(", "))]
    InvalidWordBudgetExhausted { attempts: u32, words: Vec<String> },
}

/// Per-session settings
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Explicit target; when absent the daily source is asked
    pub target_word: Option<String>,
    /// Puzzle date; defaults to today (local time)
    pub date: Option<NaiveDate>,
    pub limits: RetryLimits,
}

/// Everything recorded while a session runs
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub interactions: Vec<InteractionRecord>,
    pub invalid_attempts: Vec<InvalidAttempt>,
    pub usage: Option<UsageSummary>,
}

impl Transcript {
    /// Rejected words in submission order
    #[must_use]
    pub fn invalid_words(&self) -> Vec<String> {
        self.invalid_attempts.iter().map(|a| a.word.clone()).collect()
    }
}

/// Drives one game between a model and the game engine
pub struct GameSession<M, P> {
    model: M,
    prompt: P,
    extractor: ResponseExtractor,
    vocabulary: Arc<Vocabulary>,
    config: SessionConfig,
    daily_source: Option<Arc<dyn DailyWordSource>>,
    sink: Option<Arc<dyn ResultSink>>,
    transcript: Transcript,
}

impl<M: ModelClient, P: PromptBuilder> GameSession<M, P> {
    pub fn new(
        model: M,
        prompt: P,
        extractor: ResponseExtractor,
        vocabulary: Arc<Vocabulary>,
    ) -> Self {
        Self {
            model,
            prompt,
            extractor,
            vocabulary,
            config: SessionConfig::default(),
            daily_source: None,
            sink: None,
            transcript: Transcript::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_daily_source(mut self, source: Arc<dyn DailyWordSource>) -> Self {
        self.daily_source = Some(source);
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Record of the most recent run
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Play a complete game
    ///
    /// Never fails: errors are reported inside the returned result.
    pub fn run(&mut self) -> GameResult {
        log::info!("Starting Wordle game");
        log::info!("Model: {}", self.model.model_name());
        log::info!("Template: {}", self.prompt.name());
        log::info!("Parser: {}", self.extractor.name());

        self.transcript = Transcript::default();
        let start = Local::now();
        let date = self.config.date.unwrap_or_else(|| start.date_naive());

        let (state, error) = match self.start_game(date) {
            Ok(mut game) => match self.play(&mut game) {
                Ok(()) => (Some(game.into_state()), None),
                Err(e) => {
                    game.forfeit();
                    (Some(game.into_state()), Some(e))
                }
            },
            Err(e) => (None, Some(e)),
        };

        let result = self.assemble(start, date, state, error);
        self.persist(&result);
        result
    }

    fn start_game(&self, date: NaiveDate) -> Result<Game, SessionError> {
        let target = if let Some(word) = &self.config.target_word {
            log::info!("Using custom target word");
            log::debug!("Target: {word}");
            word.clone()
        } else {
            let source = self.daily_source.as_ref().ok_or(SessionError::NoTarget)?;
            log::info!("Using daily word for {date}");
            source.solution_for(date)?
        };
        Ok(Game::new(Arc::clone(&self.vocabulary), &target)?)
    }

    fn play(&mut self, game: &mut Game) -> Result<(), SessionError> {
        for turn in 1..=MAX_GUESSES {
            if game.state().is_over() {
                break;
            }
            log::info!("--- Guess {turn}/{MAX_GUESSES} ---");
            self.play_turn(game, turn).inspect_err(|e| {
                log::error!("Failed to make guess {turn}: {e}");
            })?;
        }
        Ok(())
    }

    fn play_turn(&mut self, game: &mut Game, turn: usize) -> Result<(), SessionError> {
        let limits = self.config.limits;
        let mut budget = TurnBudget::new(limits);

        loop {
            let attempt = budget.begin_attempt();
            let prompt = self.render_prompt(game.state());
            log::debug!("Generated prompt:\n{prompt}");

            let raw = self.model.generate(&prompt)?;
            log::debug!("Raw response: '{raw}'");

            let usage = self.model.usage();
            if let Some(usage) = &usage {
                self.transcript
                    .usage
                    .get_or_insert_with(UsageSummary::default)
                    .record(usage);
            }
            let mut record = InteractionRecord::new(turn, attempt, prompt, raw, usage);

            let Extraction { guess, reasoning } =
                match Extracted::from(self.extractor.extract(&record.raw_response)) {
                    Extracted::Parsed(extraction) => {
                        record.parse_success = true;
                        extraction
                    }
                    Extracted::ParseFailed(e) => {
                        record.parse_error_message = Some(e.to_string());
                        self.transcript.interactions.push(record);

                        if budget.record_parse_failure() == BudgetDecision::Retry {
                            log::warn!(
                                "Failed to parse response (attempt {}/{}): {e}",
                                budget.parse_failures(),
                                limits.max_parsing_attempts
                            );
                            continue;
                        }
                        return Err(SessionError::ParseBudgetExhausted {
                            attempts: limits.max_parsing_attempts,
                            last_error: e,
                        });
                    }
                };

            log::info!("Extracted guess: {guess}");
            if let Some(reasoning) = &reasoning {
                log::info!("LLM reasoning: {reasoning}");
            }

            let submission = Submission::from_guess(&guess, game.make_guess(&guess, reasoning));
            record.accepted = matches!(submission, Submission::Accepted(_));
            self.transcript.interactions.push(record);

            match submission {
                Submission::Accepted(outcome) => {
                    log_outcome(&outcome);
                    return Ok(());
                }
                Submission::RejectedInvalidWord(word) => {
                    let decision = budget.record_invalid_word();
                    self.transcript.invalid_attempts.push(InvalidAttempt::new(
                        word.clone(),
                        turn,
                        budget.invalid_words(),
                    ));

                    if decision == BudgetDecision::Retry {
                        log::warn!(
                            "Invalid word '{word}' (attempt {}/{}). Retrying...",
                            budget.invalid_words(),
                            limits.max_invalid_word_attempts
                        );
                        continue;
                    }
                    return Err(SessionError::InvalidWordBudgetExhausted {
                        attempts: limits.max_invalid_word_attempts,
                        words: self.transcript.invalid_words(),
                    });
                }
                Submission::Rejected(e) => return Err(e.into()),
            }
        }
    }

    /// Prompt for the current state, with every rejected word of the game
    /// listed back to the model
    fn render_prompt(&self, state: &GameState) -> String {
        let prompt = self.prompt.format(state);
        if self.transcript.invalid_attempts.is_empty() {
            return prompt;
        }
        let note = format!(
            "Invalid Guesses:\nNOTE: The following words you tried are not in the dictionary: {}\n\n",
            self.transcript.invalid_words().join(", ")
        );
        self.prompt.insert_feedback(&prompt, &note)
    }

    fn assemble(
        &self,
        start: DateTime<Local>,
        date: NaiveDate,
        state: Option<GameState>,
        error: Option<SessionError>,
    ) -> GameResult {
        let end = Local::now();
        #[allow(clippy::cast_precision_loss)]
        let duration_seconds = (end - start).num_milliseconds().max(0) as f64 / 1000.0;

        let invalid_word_attempts = self.transcript.invalid_words();
        let metadata = GameMetadata {
            model: self.model.model_name().to_string(),
            template: self.prompt.name().to_string(),
            parser: self.extractor.name().to_string(),
            start_time: start,
            end_time: end,
            duration_seconds,
            date,
            total_invalid_attempts: invalid_word_attempts.len(),
            invalid_word_attempts,
            usage_stats: self.transcript.usage,
        };

        match error {
            None => {
                if let Some(state) = &state {
                    self.log_summary(state, duration_seconds);
                }
                GameResult {
                    success: true,
                    golf_score: state
                        .as_ref()
                        .and_then(|s| golf_score(s.status(), s.guesses_made())),
                    game_state: state,
                    metadata,
                    error: None,
                }
            }
            Some(e) => {
                log::error!("Game failed: {e}");
                GameResult {
                    success: false,
                    game_state: state,
                    metadata,
                    golf_score: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn persist(&self, result: &GameResult) {
        let Some(sink) = &self.sink else {
            return;
        };
        match sink.save_game_result(
            result,
            &self.transcript.interactions,
            &self.transcript.invalid_attempts,
        ) {
            Ok(id) => log::debug!("Game result saved as {id}"),
            Err(e) => log::warn!("Failed to save game result: {e}"),
        }
    }

    fn log_summary(&self, state: &GameState, duration_seconds: f64) {
        log::info!("{}", "=".repeat(50));
        log::info!("GAME COMPLETE");
        if state.won() {
            log::info!(
                "VICTORY! Solved in {}/{MAX_GUESSES} guesses",
                state.guesses_made()
            );
        } else {
            log::info!("DEFEAT after {MAX_GUESSES} guesses");
        }
        log::info!("Target word: {}", state.target_word());
        log::info!("Duration: {duration_seconds:.1}s");
        log::info!("Model: {}", self.model.model_name());

        log::info!("Guess sequence:");
        for (i, (guess, reasoning)) in state
            .guesses()
            .iter()
            .zip(state.guess_reasoning())
            .enumerate()
        {
            log::info!(
                "  {}. {guess} - {}",
                i + 1,
                reasoning.as_deref().unwrap_or("No reasoning")
            );
        }

        let invalid = self.transcript.invalid_words();
        if !invalid.is_empty() {
            log::info!(
                "Invalid words attempted: {} ({} total)",
                invalid.join(", "),
                invalid.len()
            );
        }
    }
}

fn log_outcome(outcome: &GuessOutcome) {
    let line: String = outcome
        .feedback
        .letters()
        .iter()
        .map(|e| format!("{}{}", e.status.emoji(), e.letter))
        .collect();
    log::info!("Guess: {}", outcome.guess);
    log::info!("Status: {}", outcome.status.as_str().to_uppercase());
    log::info!("Guesses Remaining: {}", outcome.guesses_remaining);
    log::info!("Result: {line}");
}
