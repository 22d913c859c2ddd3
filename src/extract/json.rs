//! Structured (JSON) guess extraction
//!
//! The whole response must be a JSON object with a string `guess` field and,
//! optionally or mandatorily depending on the extractor, a string `reasoning`
//! field. Nothing is salvaged from surrounding prose.

use super::{ExtractError, Extraction};
use crate::core::Word;
use serde_json::{Map, Value};

const GUESS_FIELD: &str = "guess";
const REASONING_FIELD: &str = "reasoning";

/// Parse a JSON response
///
/// # Errors
///
/// - `ExtractError::MalformedJson` if the text is not valid JSON
/// - `ExtractError::NotAnObject` if it is valid JSON but not an object
/// - `ExtractError::MissingField` / `ExtractError::WrongFieldType` for bad fields
/// - `ExtractError::InvalidGuess` if `guess` is not 5 letters
pub fn extract(response: &str, require_reasoning: bool) -> Result<Extraction, ExtractError> {
    let response = response.trim();
    let value: Value =
        serde_json::from_str(response).map_err(|source| ExtractError::MalformedJson {
            response: response.to_string(),
            source,
        })?;

    let Value::Object(object) = value else {
        return Err(ExtractError::NotAnObject);
    };

    let guess = string_field(&object, GUESS_FIELD)?.ok_or(ExtractError::MissingField(GUESS_FIELD))?;
    let guess = Word::new(guess)?;

    let reasoning = string_field(&object, REASONING_FIELD)?
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    if require_reasoning && reasoning.is_none() {
        return Err(ExtractError::MissingField(REASONING_FIELD));
    }

    Ok(Extraction {
        guess: guess.into_string(),
        reasoning,
    })
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, ExtractError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ExtractError::WrongFieldType {
            field,
            expected: "string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WordError;

    #[test]
    fn extracts_guess_and_reasoning() {
        let extraction = extract(
            r#"{"reasoning": "Common letters first.", "guess": "crane"}"#,
            false,
        )
        .unwrap();
        assert_eq!(extraction.guess, "CRANE");
        assert_eq!(extraction.reasoning.as_deref(), Some("Common letters first."));
    }

    #[test]
    fn surrounding_whitespace_is_allowed() {
        let extraction = extract("\n  {\"guess\": \"SLATE\"}  \n", false).unwrap();
        assert_eq!(extraction.guess, "SLATE");
        assert_eq!(extraction.reasoning, None);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = extract("Sure! {\"guess\": \"crane\"}", false).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedJson { .. }));
        assert!(err.to_string().starts_with("Failed to parse JSON response"));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(
            extract(r#"["crane"]"#, false),
            Err(ExtractError::NotAnObject)
        ));
        assert!(matches!(
            extract(r#""crane""#, false),
            Err(ExtractError::NotAnObject)
        ));
    }

    #[test]
    fn missing_guess_field() {
        assert!(matches!(
            extract(r#"{"reasoning": "hmm"}"#, false),
            Err(ExtractError::MissingField("guess"))
        ));
        assert!(matches!(
            extract(r#"{"guess": null}"#, false),
            Err(ExtractError::MissingField("guess"))
        ));
    }

    #[test]
    fn non_string_guess_field() {
        assert!(matches!(
            extract(r#"{"guess": 12345}"#, false),
            Err(ExtractError::WrongFieldType { field: "guess", .. })
        ));
    }

    #[test]
    fn malformed_guess_shape() {
        assert!(matches!(
            extract(r#"{"guess": "cranes"}"#, false),
            Err(ExtractError::InvalidGuess(WordError::InvalidLength(6)))
        ));
        assert!(matches!(
            extract(r#"{"guess": "cr4ne"}"#, false),
            Err(ExtractError::InvalidGuess(WordError::InvalidCharacters))
        ));
    }

    #[test]
    fn strict_mode_requires_reasoning() {
        assert!(matches!(
            extract(r#"{"guess": "crane"}"#, true),
            Err(ExtractError::MissingField("reasoning"))
        ));
        assert!(matches!(
            extract(r#"{"guess": "crane", "reasoning": "   "}"#, true),
            Err(ExtractError::MissingField("reasoning"))
        ));
        assert!(extract(r#"{"guess": "crane", "reasoning": "ok"}"#, true).is_ok());
    }
}
