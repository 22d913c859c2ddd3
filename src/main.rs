//! Wordle Bench - CLI
//!
//! Plays Wordle with a model in the loop and records how it went.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use wordle_bench::{
    commands::{
        ModelKind, PlayConfig, Style, add_words, check_words, play_game, run_benchmark,
        select_targets,
    },
    output::{print_benchmark_result, print_game_result, print_word_reports},
    session::{JsonlSink, ResultSink, RetryLimits, SessionConfig},
    vocabulary::Vocabulary,
};

#[derive(Parser)]
#[command(
    name = "wordle_bench",
    about = "Benchmark language models by having them play Wordle",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base word list, one 5-letter word per line
    #[arg(long, global = true, env = "WORDLE_WORDS_FILE", default_value = "data/valid-words.txt")]
    words_file: PathBuf,

    /// Log of words added at runtime
    #[arg(long, global = true, env = "WORDLE_LOG_FILE", default_value = "data/added-valid-words.log")]
    log_file: PathBuf,

    /// Show debug logs (prompts and raw responses)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args, Clone, Copy)]
struct Limits {
    /// Unparseable responses allowed per turn
    #[arg(long, default_value_t = 5)]
    max_parse_attempts: u32,

    /// Unknown words allowed per turn
    #[arg(long, default_value_t = 5)]
    max_invalid_attempts: u32,
}

impl From<Limits> for RetryLimits {
    fn from(limits: Limits) -> Self {
        Self {
            max_parsing_attempts: limits.max_parse_attempts,
            max_invalid_word_attempts: limits.max_invalid_attempts,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play {
        /// Target word (default: the daily word)
        #[arg(short, long)]
        target: Option<String>,

        /// Puzzle date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Model: baseline (default) or stdin
        #[arg(short, long, default_value = "baseline")]
        model: String,

        /// Prompt style: simple (default) or json
        #[arg(short, long, default_value = "simple")]
        style: String,

        #[command(flatten)]
        limits: Limits,

        /// Append the result to this JSON-lines file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the model's reasoning under each guess
        #[arg(short, long)]
        reasoning: bool,
    },

    /// Play many games with the baseline model
    Benchmark {
        /// Number of random target words
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,

        /// Seed for target selection
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Prompt style: simple (default) or json
        #[arg(short, long, default_value = "simple")]
        style: String,

        #[command(flatten)]
        limits: Limits,

        /// Append every result to this JSON-lines file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or extend the word list
    Words {
        #[command(subcommand)]
        action: WordsAction,
    },
}

#[derive(Subcommand)]
enum WordsAction {
    /// Add words to the word list
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Check whether words are accepted
    Check {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Show word list size and locations
    Stats,
}

fn init_logging(verbose: bool, quiet_default: bool) {
    let default = if verbose {
        "debug"
    } else if quiet_default {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn parse_style(name: &str) -> Result<Style> {
    Style::from_name(name)
        .ok_or_else(|| anyhow!("Unknown style '{name}' (expected one of: {})", Style::NAMES.join(", ")))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, matches!(cli.command, Commands::Benchmark { .. }));

    let vocabulary = Arc::new(Vocabulary::new(&cli.words_file, &cli.log_file));

    match cli.command {
        Commands::Play {
            target,
            date,
            model,
            style,
            limits,
            output,
            reasoning,
        } => {
            let model = ModelKind::from_name(&model).ok_or_else(|| {
                anyhow!(
                    "Unknown model '{model}' (expected one of: {})",
                    ModelKind::NAMES.join(", ")
                )
            })?;
            let config = PlayConfig {
                model,
                style: parse_style(&style)?,
                session: SessionConfig {
                    target_word: target,
                    date,
                    limits: limits.into(),
                },
                results_file: output,
            };
            let result = play_game(config, &vocabulary)?;
            print_game_result(&result, reasoning);
            Ok(())
        }
        Commands::Benchmark {
            count,
            seed,
            style,
            limits,
            output,
        } => {
            let style = parse_style(&style)?;
            let sink: Option<Arc<dyn ResultSink>> = match output {
                Some(path) => Some(Arc::new(
                    JsonlSink::create(&path)
                        .with_context(|| format!("Cannot record results to {}", path.display()))?,
                )),
                None => None,
            };
            let targets = select_targets(&vocabulary, count, seed)?;

            println!("Running benchmark on {} random words...", targets.len());
            let result = run_benchmark(&vocabulary, &targets, style, limits.into(), sink.as_ref());
            print_benchmark_result(&result);
            Ok(())
        }
        Commands::Words { action } => match action {
            WordsAction::Add { words } => {
                print_word_reports(&add_words(&vocabulary, &words)?);
                Ok(())
            }
            WordsAction::Check { words } => {
                print_word_reports(&check_words(&vocabulary, &words)?);
                Ok(())
            }
            WordsAction::Stats => {
                println!("Words:        {}", vocabulary.len()?);
                println!("Base list:    {}", cli.words_file.display());
                println!("Addition log: {}", cli.log_file.display());
                Ok(())
            }
        },
    }
}
