//! Benchmark command
//!
//! Plays many sessions of the baseline model in parallel against one shared
//! vocabulary and aggregates the outcomes.

use super::play::Style;
use crate::model::BaselineModel;
use crate::session::{GameResult, GameSession, ResultSink, RetryLimits, SessionConfig};
use crate::vocabulary::{Vocabulary, WordListError};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Aggregate of a benchmark run
#[derive(Debug)]
pub struct BenchmarkResult {
    pub total_games: usize,
    pub won: usize,
    pub lost: usize,
    /// Sessions that ended in an error
    pub failed: usize,
    /// Guesses per won game
    pub average_guesses: f64,
    pub average_golf_score: f64,
    pub distribution: FxHashMap<usize, usize>,
    pub invalid_attempts: usize,
    pub failures: Vec<(String, String)>,
    pub duration: Duration,
    pub games_per_second: f64,
}

impl BenchmarkResult {
    fn from_results(targets: &[String], results: &[GameResult], duration: Duration) -> Self {
        let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();
        let mut won_guesses = 0;
        let mut golf_total = 0;
        let mut scored = 0;
        let mut failures = Vec::new();

        for (target, result) in targets.iter().zip(results) {
            if let Some(error) = &result.error {
                failures.push((target.clone(), error.clone()));
            }
            if result.won() {
                won_guesses += result.guesses_made();
                *distribution.entry(result.guesses_made()).or_insert(0) += 1;
            }
            if let Some(score) = result.golf_score {
                golf_total += score;
                scored += 1;
            }
        }

        let won: usize = distribution.values().sum();
        let failed = failures.len();
        let total_games = results.len();

        Self {
            total_games,
            won,
            lost: total_games - won - failed,
            failed,
            average_guesses: if won > 0 {
                won_guesses as f64 / won as f64
            } else {
                0.0
            },
            average_golf_score: if scored > 0 {
                f64::from(golf_total) / f64::from(scored)
            } else {
                0.0
            },
            distribution,
            invalid_attempts: results
                .iter()
                .map(|r| r.metadata.total_invalid_attempts)
                .sum(),
            failures,
            duration,
            games_per_second: total_games as f64 / duration.as_secs_f64().max(f64::EPSILON),
        }
    }
}

/// Pick `count` distinct targets from the vocabulary, reproducibly for `seed`
///
/// # Errors
///
/// Fails only if the vocabulary cannot be loaded.
pub fn select_targets(
    vocabulary: &Vocabulary,
    count: usize,
    seed: u64,
) -> Result<Vec<String>, WordListError> {
    let words = vocabulary.words()?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(words.choose_multiple(&mut rng, count).cloned().collect())
}

/// Play one baseline session per target
///
/// Sessions run on the rayon pool and share `vocabulary`. Each finished game
/// is handed to `sink` when one is given.
#[must_use]
pub fn run_benchmark(
    vocabulary: &Arc<Vocabulary>,
    targets: &[String],
    style: Style,
    limits: RetryLimits,
    sink: Option<&Arc<dyn ResultSink>>,
) -> BenchmarkResult {
    let pb = ProgressBar::new(targets.len() as u64);
    if let Ok(bar_style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(bar_style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let results: Vec<GameResult> = targets
        .par_iter()
        .map(|target| {
            let model = BaselineModel::new(Arc::clone(vocabulary), style.response_style());
            let mut session = GameSession::new(
                model,
                style.template(),
                style.extractor(),
                Arc::clone(vocabulary),
            )
            .with_config(SessionConfig {
                target_word: Some(target.clone()),
                limits,
                ..SessionConfig::default()
            });
            if let Some(sink) = sink {
                session = session.with_sink(Arc::clone(sink));
            }

            let result = session.run();
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_with_message("Complete!");

    BenchmarkResult::from_results(targets, &results, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySink;

    const WORDS: [&str; 12] = [
        "slate", "crane", "trace", "grace", "brace", "place", "shine", "mound", "pious", "dwelt",
        "fuzzy", "jumbo",
    ];

    fn vocabulary() -> Arc<Vocabulary> {
        Arc::new(Vocabulary::from_words(WORDS))
    }

    #[test]
    fn benchmark_runs() {
        let vocabulary = vocabulary();
        let targets = select_targets(&vocabulary, 8, 7).unwrap();
        let result = run_benchmark(
            &vocabulary,
            &targets,
            Style::Simple,
            RetryLimits::default(),
            None,
        );

        assert_eq!(result.total_games, 8);
        assert_eq!(result.failed, 0);
        assert_eq!(result.won + result.lost, 8);
        assert!(result.average_guesses >= 1.0);
    }

    #[test]
    fn distribution_sums_to_wins() {
        let vocabulary = vocabulary();
        let targets: Vec<String> = WORDS.iter().map(|w| w.to_uppercase()).collect();
        let result = run_benchmark(
            &vocabulary,
            &targets,
            Style::Json,
            RetryLimits::default(),
            None,
        );

        assert_eq!(result.distribution.values().sum::<usize>(), result.won);
        for &guesses in result.distribution.keys() {
            assert!((1..=6).contains(&guesses));
        }
        assert_eq!(result.invalid_attempts, 0);
    }

    #[test]
    fn failures_are_counted_per_target() {
        let vocabulary = vocabulary();
        let targets = vec!["crane".to_string(), "toolong".to_string()];
        let result = run_benchmark(
            &vocabulary,
            &targets,
            Style::Simple,
            RetryLimits::default(),
            None,
        );

        assert_eq!(result.failed, 1);
        assert_eq!(result.failures[0].0, "toolong");
        assert_eq!(result.total_games, 2);
    }

    #[test]
    fn sink_receives_each_game() {
        let vocabulary = vocabulary();
        let memory = Arc::new(MemorySink::new());
        let sink: Arc<dyn ResultSink> = memory.clone();
        let targets = select_targets(&vocabulary, 3, 1).unwrap();
        let result = run_benchmark(
            &vocabulary,
            &targets,
            Style::Simple,
            RetryLimits::default(),
            Some(&sink),
        );

        assert_eq!(result.total_games, 3);
        assert_eq!(memory.games().len(), 3);
    }

    #[test]
    fn target_selection_is_seeded() {
        let vocabulary = vocabulary();
        assert_eq!(
            select_targets(&vocabulary, 5, 42).unwrap(),
            select_targets(&vocabulary, 5, 42).unwrap()
        );
        assert_eq!(select_targets(&vocabulary, 100, 1).unwrap().len(), WORDS.len());
    }

    #[test]
    fn empty_benchmark() {
        let result = run_benchmark(&vocabulary(), &[], Style::Simple, RetryLimits::default(), None);
        assert_eq!(result.total_games, 0);
        assert!(result.distribution.is_empty());
    }
}
