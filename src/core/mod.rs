//! Core domain types for Wordle
//!
//! Pure, deterministic building blocks: validated words and guess scoring.

mod feedback;
mod word;

pub use feedback::{Feedback, LetterEvaluation, LetterStatus};
pub use word::{WORD_LENGTH, Word, WordError, is_valid_format};
