//! Prompt rendering
//!
//! A [`PromptBuilder`] turns a [`GameState`] into the text sent to a model,
//! and knows where corrective feedback (such as previously rejected words)
//! belongs in that text. [`PromptTemplate`] provides the two built-in styles.

use crate::game::{GameState, MAX_GUESSES};
use std::fmt::Write;

/// Section header that opens the current-state block of every built-in prompt
pub const CURRENT_STATE_MARKER: &str = "Guesses made:";

const BASE_INSTRUCTIONS: &str = "\
You are playing Wordle. Guess the 5-letter word in 6 tries or fewer.

Rules:
- Each guess must be a valid 5-letter word
- After each guess, you'll get feedback:
  * \"correct\" - letter is in the word and in the right position (green)
  * \"present\" - letter is in the word but in the wrong position (yellow)
  * \"absent\" - letter is not in the word (gray)
";

const JSON_INSTRUCTIONS: &str = r#"
IMPORTANT: You must respond in valid JSON format with exactly two fields:
{
    "reasoning": "Your 1-2 sentence explanation for your guess",
    "guess": "YOUR5LETTERWORD"
}

Example response:
{
    "reasoning": "The word contains R and E but not in positions 2 and 5, so I'll try a common word with R and E elsewhere.",
    "guess": "CRANE"
}
"#;

/// Renders game state for a model
pub trait PromptBuilder {
    /// Identifier recorded in game metadata
    fn name(&self) -> &str;

    /// Render the prompt for the current state
    fn format(&self, state: &GameState) -> String;

    /// Place a feedback note into an already rendered prompt
    ///
    /// The default puts it right before the current-state section, or at the
    /// end when that section is absent.
    fn insert_feedback(&self, prompt: &str, feedback: &str) -> String {
        match prompt.find(CURRENT_STATE_MARKER) {
            Some(at) => {
                let mut out = String::with_capacity(prompt.len() + feedback.len());
                out.push_str(&prompt[..at]);
                out.push_str(feedback);
                out.push_str(&prompt[at..]);
                out
            }
            None => format!("{prompt}\n{feedback}"),
        }
    }
}

/// Built-in prompt styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Rules and history; asks for a bare word
    Simple,
    /// Rules and history; asks for a JSON object with reasoning
    Json,
}

impl PromptTemplate {
    /// Names accepted by [`PromptTemplate::from_name`]
    pub const NAMES: [&'static str; 2] = ["simple", "json"];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "simple" => Some(Self::Simple),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl PromptBuilder for PromptTemplate {
    fn name(&self) -> &str {
        match self {
            Self::Simple => "simple",
            Self::Json => "json",
        }
    }

    fn format(&self, state: &GameState) -> String {
        let mut prompt = String::from(BASE_INSTRUCTIONS);
        if matches!(self, Self::Json) {
            prompt.push_str(JSON_INSTRUCTIONS);
        }

        push_history(&mut prompt, state);
        push_current_state(&mut prompt, state);

        match self {
            Self::Simple => {
                prompt.push_str("Respond with only your guess as a single 5-letter word.\n\n");
                prompt.push_str("Your next guess:");
            }
            Self::Json => {
                prompt.push_str(
                    "Remember: Respond with valid JSON containing 'reasoning' (1-2 sentences) and 'guess' fields.\n\n",
                );
                prompt.push_str("Your response:");
            }
        }
        prompt
    }
}

fn push_history(prompt: &mut String, state: &GameState) {
    if state.guesses().is_empty() {
        return;
    }
    prompt.push_str("\nPrevious Guesses:\n");
    for (i, (guess, feedback)) in state
        .guesses()
        .iter()
        .zip(state.guess_results())
        .enumerate()
    {
        let _ = writeln!(prompt, "{}. {guess}: {}", i + 1, feedback.describe());
    }
    prompt.push('\n');
}

fn push_current_state(prompt: &mut String, state: &GameState) {
    let _ = writeln!(
        prompt,
        "{CURRENT_STATE_MARKER} {}/{MAX_GUESSES}",
        state.guesses_made()
    );
    let _ = writeln!(prompt, "Guesses remaining: {}\n", state.guesses_remaining());
}
