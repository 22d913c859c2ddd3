//! Formatting utilities for terminal output

use crate::core::{Feedback, LetterStatus};
use colored::Colorize;

/// Format feedback as colored letter tiles
#[must_use]
pub fn feedback_tiles(feedback: &Feedback) -> String {
    feedback
        .letters()
        .iter()
        .map(|e| {
            let tile = format!(" {} ", e.letter);
            match e.status {
                LetterStatus::Correct => tile.black().on_green().bold().to_string(),
                LetterStatus::Present => tile.black().on_yellow().bold().to_string(),
                LetterStatus::Absent => tile.white().on_bright_black().to_string(),
            }
        })
        .collect()
}

/// Golf score with an explicit sign; par is `E`
#[must_use]
pub fn golf_label(score: i32) -> String {
    match score {
        0 => "E".to_string(),
        s if s > 0 => format!("+{s}"),
        s => s.to_string(),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
