//! Command implementations

pub mod benchmark;
pub mod play;
pub mod words;

pub use benchmark::{BenchmarkResult, run_benchmark, select_targets};
pub use play::{ModelKind, PlayConfig, Style, play_game};
pub use words::{WordReport, WordStatus, add_words, check_words};
