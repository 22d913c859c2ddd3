//! Free-text guess extraction
//!
//! Tries, in order, and returns the first hit:
//! 1. a 5-letter word in single or double quotes (`'CRANE'`, `"crane"`)
//! 2. a standalone all-uppercase 5-letter word
//! 3. the last standalone 5-letter word

use super::{ExtractError, Extraction};
use crate::core::{WORD_LENGTH, Word, is_valid_format};

type Method = fn(&str) -> Option<&str>;

const METHODS: [(&str, Method); 3] = [
    ("quoted word", quoted_word),
    ("all-caps word", all_caps_word),
    ("last 5-letter word", last_word),
];

/// Run the extraction chain over a raw response
///
/// # Errors
///
/// Returns `ExtractError::Exhausted` when no method yields a valid word.
pub fn extract(response: &str) -> Result<Extraction, ExtractError> {
    let response = response.trim();

    for (name, method) in METHODS {
        let Some(candidate) = method(response) else {
            continue;
        };
        if let Ok(word) = Word::new(candidate) {
            log::debug!("Extracted '{word}' using {name}");
            return Ok(Extraction {
                guess: word.into_string(),
                reasoning: None,
            });
        }
    }

    Err(ExtractError::Exhausted {
        response: response.to_string(),
    })
}

fn is_quote(byte: u8) -> bool {
    byte == b'"' || byte == b'\''
}

/// First `<quote>LLLLL<quote>` occurrence
fn quoted_word(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    (0..bytes.len().saturating_sub(WORD_LENGTH + 1)).find_map(|start| {
        let end = start + WORD_LENGTH + 1;
        let inner = &bytes[start + 1..end];
        (is_quote(bytes[start]) && is_quote(bytes[end]) && inner.iter().all(u8::is_ascii_alphabetic))
            .then(|| &text[start + 1..end])
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Maximal runs of word characters, i.e. the text between word boundaries
fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|run| !run.is_empty())
}

fn all_caps_word(text: &str) -> Option<&str> {
    word_runs(text).find(|run| is_valid_format(run) && run.bytes().all(|b| b.is_ascii_uppercase()))
}

fn last_word(text: &str) -> Option<&str> {
    word_runs(text).filter(|run| is_valid_format(run)).last()
}
