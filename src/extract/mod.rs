//! Turning raw model output into a guess
//!
//! Two extractors, matched to the prompt style in use:
//! - `simple`: free text, searched with an ordered fallback chain
//! - `json` / `json-strict`: a strict JSON object with `guess` and
//!   `reasoning` fields (`json-strict` requires the reasoning)
//!
//! Extraction failures count against a session's parse budget; vocabulary
//! rejections from the game count against its invalid-word budget.

pub mod json;
pub mod simple;

use crate::core::WordError;
use thiserror::Error;

/// A candidate guess pulled out of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Uppercase, format-valid 5-letter word (vocabulary not yet checked)
    pub guess: String,
    pub reasoning: Option<String>,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("All extraction methods failed for response: '{response}'")]
    Exhausted { response: String },

    #[error("Failed to parse JSON response: '{response}' ({source})")]
    MalformedJson {
        response: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON response must be an object")]
    NotAnObject,

    #[error("JSON response missing '{0}' field")]
    MissingField(&'static str),

    #[error("JSON field '{field}' must be a {expected}")]
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid guess format: {0}")]
    InvalidGuess(#[from] WordError),
}

/// Extraction strategy, selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseExtractor {
    Simple,
    Json { require_reasoning: bool },
}

impl ResponseExtractor {
    /// Names accepted by [`ResponseExtractor::from_name`]
    pub const NAMES: [&'static str; 3] = ["simple", "json", "json-strict"];

    /// Look up an extractor by name
    ///
    /// # Examples
    /// ```
    /// use wordle_bench::extract::ResponseExtractor;
    ///
    /// let extractor = ResponseExtractor::from_name("json").unwrap();
    /// let extraction = extractor.extract(r#"{"guess": "crane"}"#).unwrap();
    /// assert_eq!(extraction.guess, "CRANE");
    ///
    /// assert!(ResponseExtractor::from_name("regex").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "simple" => Some(Self::Simple),
            "json" => Some(Self::Json {
                require_reasoning: false,
            }),
            "json-strict" => Some(Self::Json {
                require_reasoning: true,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Json {
                require_reasoning: false,
            } => "json",
            Self::Json {
                require_reasoning: true,
            } => "json-strict",
        }
    }

    /// Extract a guess (and reasoning, if the format carries it)
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` when no guess can be recovered.
    pub fn extract(self, response: &str) -> Result<Extraction, ExtractError> {
        match self {
            Self::Simple => simple::extract(response),
            Self::Json { require_reasoning } => json::extract(response, require_reasoning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for name in ResponseExtractor::NAMES {
            assert_eq!(ResponseExtractor::from_name(name).unwrap().name(), name);
        }
    }

    #[test]
    fn dispatches_to_matching_strategy() {
        let text = "I'd say 'crane'";
        assert_eq!(ResponseExtractor::Simple.extract(text).unwrap().guess, "CRANE");
        assert!(matches!(
            ResponseExtractor::from_name("json").unwrap().extract(text),
            Err(ExtractError::MalformedJson { .. })
        ));
    }
}
