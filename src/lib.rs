//! Wordle Bench
//!
//! Benchmarks text-generating models by having them play Wordle under strict
//! rules, keeping a complete record of every model call.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use wordle_bench::extract::ResponseExtractor;
//! use wordle_bench::model::ScriptedModel;
//! use wordle_bench::prompt::PromptTemplate;
//! use wordle_bench::session::{GameSession, SessionConfig};
//! use wordle_bench::vocabulary::Vocabulary;
//!
//! let vocabulary = Arc::new(Vocabulary::from_words(["crane", "slate"]));
//! let model = ScriptedModel::new("scripted", ["slate", "I'll go with CRANE"]);
//!
//! let mut session = GameSession::new(
//!     model,
//!     PromptTemplate::Simple,
//!     ResponseExtractor::Simple,
//!     vocabulary,
//! )
//! .with_config(SessionConfig {
//!     target_word: Some("crane".into()),
//!     ..SessionConfig::default()
//! });
//!
//! let result = session.run();
//! assert!(result.won());
//! assert_eq!(result.golf_score, Some(-2));
//! ```

// Core domain types
pub mod core;

// Accepted words
pub mod vocabulary;

// Game state machine and daily targets
pub mod game;

// Guess extraction from model output
pub mod extract;

// Prompt rendering
pub mod prompt;

// Model collaborators
pub mod model;

// Turn orchestration, results and persistence
pub mod session;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
