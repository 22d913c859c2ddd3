//! Play command
//!
//! Runs a single session with a named model and response style.

use crate::extract::ResponseExtractor;
use crate::game::VocabularyDailySource;
use crate::model::{BaselineModel, ModelClient, ResponseStyle, StdinModel};
use crate::prompt::PromptTemplate;
use crate::session::{GameResult, GameSession, JsonlSink, SessionConfig};
use crate::vocabulary::Vocabulary;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Prompt template, extractor and reply shape that belong together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Simple,
    Json,
}

impl Style {
    pub const NAMES: [&'static str; 2] = ["simple", "json"];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "simple" => Some(Self::Simple),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    #[must_use]
    pub const fn template(self) -> PromptTemplate {
        match self {
            Self::Simple => PromptTemplate::Simple,
            Self::Json => PromptTemplate::Json,
        }
    }

    #[must_use]
    pub const fn extractor(self) -> ResponseExtractor {
        match self {
            Self::Simple => ResponseExtractor::Simple,
            Self::Json => ResponseExtractor::Json {
                require_reasoning: false,
            },
        }
    }

    #[must_use]
    pub const fn response_style(self) -> ResponseStyle {
        match self {
            Self::Simple => ResponseStyle::Plain,
            Self::Json => ResponseStyle::Json,
        }
    }
}

/// Who answers the prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Built-in candidate-filtering solver
    Baseline,
    /// A person typing at the terminal
    Stdin,
}

impl ModelKind {
    pub const NAMES: [&'static str; 2] = ["baseline", "stdin"];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "baseline" => Some(Self::Baseline),
            "stdin" | "human" => Some(Self::Stdin),
            _ => None,
        }
    }

    fn client(self, vocabulary: &Arc<Vocabulary>, style: Style) -> Box<dyn ModelClient> {
        match self {
            Self::Baseline => Box::new(BaselineModel::new(
                Arc::clone(vocabulary),
                style.response_style(),
            )),
            Self::Stdin => Box::new(StdinModel::stdin()),
        }
    }
}

/// Configuration for a single game
#[derive(Debug, Clone)]
pub struct PlayConfig {
    pub model: ModelKind,
    pub style: Style,
    pub session: SessionConfig,
    /// JSON-lines file to append the result to
    pub results_file: Option<PathBuf>,
}

/// Play one game; session failures are reported in the result, not as `Err`
///
/// # Errors
///
/// Returns an error if the results file cannot be opened.
pub fn play_game(config: PlayConfig, vocabulary: &Arc<Vocabulary>) -> Result<GameResult> {
    let model = config.model.client(vocabulary, config.style);
    let mut session = GameSession::new(
        model,
        config.style.template(),
        config.style.extractor(),
        Arc::clone(vocabulary),
    )
    .with_config(config.session)
    .with_daily_source(Arc::new(VocabularyDailySource::new(Arc::clone(vocabulary))));

    if let Some(path) = &config.results_file {
        let sink = JsonlSink::create(path)
            .with_context(|| format!("Cannot record results to {}", path.display()))?;
        session = session.with_sink(Arc::new(sink));
    }

    Ok(session.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn vocabulary() -> Arc<Vocabulary> {
        Arc::new(Vocabulary::from_words([
            "slate", "crane", "trace", "grace", "brace", "place", "shine", "mound",
        ]))
    }

    #[test]
    fn baseline_plays_a_target() {
        for style in [Style::Simple, Style::Json] {
            let config = PlayConfig {
                model: ModelKind::Baseline,
                style,
                session: SessionConfig {
                    target_word: Some("brace".into()),
                    ..SessionConfig::default()
                },
                results_file: None,
            };
            let result = play_game(config, &vocabulary()).unwrap();
            assert!(result.success);
            assert!(result.won());
            assert_eq!(result.metadata.model, "baseline");
        }
    }

    #[test]
    fn daily_target_is_stable_for_a_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let config = PlayConfig {
            model: ModelKind::Baseline,
            style: Style::Simple,
            session: SessionConfig {
                date: Some(date),
                ..SessionConfig::default()
            },
            results_file: None,
        };

        let vocabulary = vocabulary();
        let first = play_game(config.clone(), &vocabulary).unwrap();
        let second = play_game(config, &vocabulary).unwrap();
        assert_eq!(first.target_word(), second.target_word());
        assert_eq!(first.metadata.date, date);
    }

    #[test]
    fn results_are_appended_to_file() {
        let dir = std::env::temp_dir().join(format!("wordle_bench_play_{}", uuid::Uuid::new_v4()));
        let path = dir.join("games.jsonl");
        let config = PlayConfig {
            model: ModelKind::Baseline,
            style: Style::Json,
            session: SessionConfig {
                target_word: Some("mound".into()),
                ..SessionConfig::default()
            },
            results_file: Some(path.clone()),
        };

        play_game(config, &vocabulary()).unwrap();
        let games = JsonlSink::read(&path).unwrap();
        assert_eq!(games.len(), 1);
        assert!(games[0].result.won());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn names_resolve() {
        for name in Style::NAMES {
            assert!(Style::from_name(name).is_some());
        }
        for name in ModelKind::NAMES {
            assert!(ModelKind::from_name(name).is_some());
        }
        assert!(ModelKind::from_name("gpt").is_none());
    }
}
