//! Deterministic solver speaking the model protocol
//!
//! Reads the guess history back out of the rendered prompt, keeps the
//! vocabulary words consistent with every piece of feedback, and answers with
//! the candidate whose letters are most common among the survivors. Useful
//! as a reference score and for exercising the full pipeline offline.

use super::{ModelClient, ModelError, UsageStats};
use crate::core::{Feedback, LetterStatus, WORD_LENGTH, Word};
use crate::vocabulary::Vocabulary;
use std::sync::Arc;
use std::time::Instant;

/// Opening guess used when the vocabulary contains it
pub const DEFAULT_OPENER: &str = "SLATE";

/// Shape of the baseline's replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStyle {
    /// The bare word
    Plain,
    /// `{"reasoning": ..., "guess": ...}`
    Json,
}

impl ResponseStyle {
    pub const NAMES: [&'static str; 2] = ["simple", "json"];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "simple" | "plain" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub struct BaselineModel {
    vocabulary: Arc<Vocabulary>,
    style: ResponseStyle,
    words: Option<Vec<Word>>,
    last_usage: Option<UsageStats>,
}

impl BaselineModel {
    #[must_use]
    pub const fn new(vocabulary: Arc<Vocabulary>, style: ResponseStyle) -> Self {
        Self {
            vocabulary,
            style,
            words: None,
            last_usage: None,
        }
    }

    /// Vocabulary snapshot, taken on first use
    fn words(&mut self) -> Result<&[Word], ModelError> {
        if self.words.is_none() {
            let words = self
                .vocabulary
                .words()
                .map_err(|e| ModelError::Other(e.to_string()))?
                .iter()
                .filter_map(|w| Word::new(w).ok())
                .collect();
            self.words = Some(words);
        }
        Ok(self.words.as_deref().unwrap_or_default())
    }

    fn choose(&mut self, history: &[(Word, [LetterStatus; WORD_LENGTH])]) -> Result<(Word, usize), ModelError> {
        let words = self.words()?;

        if history.is_empty()
            && let Some(opener) = words.iter().find(|w| w.text() == DEFAULT_OPENER)
        {
            return Ok((opener.clone(), words.len()));
        }

        let candidates = filter_candidates(words, history);
        best_by_letter_frequency(&candidates)
            .map(|w| ((*w).clone(), candidates.len()))
            .ok_or_else(|| ModelError::Other("no vocabulary word fits the feedback".into()))
    }

    fn render(&self, guess: &Word, remaining: usize) -> String {
        match self.style {
            ResponseStyle::Plain => guess.to_string(),
            ResponseStyle::Json => serde_json::json!({
                "reasoning": format!(
                    "{remaining} candidate words fit the feedback so far; {guess} covers the most common letters among them."
                ),
                "guess": guess.text(),
            })
            .to_string(),
        }
    }
}

impl ModelClient for BaselineModel {
    fn generate(&mut self, prompt: &str) -> Result<String, ModelError> {
        let start = Instant::now();
        let history = parse_history(prompt);
        let (guess, remaining) = self.choose(&history)?;
        let response = self.render(&guess, remaining);

        let prompt_tokens = count_tokens(prompt);
        let completion_tokens = count_tokens(&response);
        self.last_usage = Some(UsageStats {
            prompt_tokens,
            completion_tokens,
            reasoning_tokens: 0,
            total_tokens: prompt_tokens + completion_tokens,
            cost_usd: 0.0,
            latency_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        });

        log::debug!("baseline: {guess} ({remaining} candidates)");
        Ok(response)
    }

    fn model_name(&self) -> &str {
        "baseline"
    }

    fn usage(&self) -> Option<UsageStats> {
        self.last_usage
    }
}

fn count_tokens(text: &str) -> u32 {
    u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
}

/// Recover `(guess, statuses)` pairs from lines like
/// `1. SLATE: S(absent) L(absent) A(correct) T(absent) E(correct)`
fn parse_history(prompt: &str) -> Vec<(Word, [LetterStatus; WORD_LENGTH])> {
    prompt.lines().filter_map(parse_history_line).collect()
}

fn parse_history_line(line: &str) -> Option<(Word, [LetterStatus; WORD_LENGTH])> {
    let (number, rest) = line.trim().split_once(". ")?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (guess, feedback) = rest.split_once(": ")?;
    let guess = Word::new(guess).ok()?;

    let mut statuses = [LetterStatus::Absent; WORD_LENGTH];
    let mut tokens = feedback.split_whitespace();
    for (i, slot) in statuses.iter_mut().enumerate() {
        let (letter, status) = tokens.next()?.strip_suffix(')')?.split_once('(')?;
        if letter.as_bytes() != [guess.letters()[i]] {
            return None;
        }
        *slot = parse_status(status)?;
    }
    tokens.next().is_none().then_some((guess, statuses))
}

fn parse_status(name: &str) -> Option<LetterStatus> {
    [LetterStatus::Correct, LetterStatus::Present, LetterStatus::Absent]
        .into_iter()
        .find(|s| s.as_str() == name)
}

/// Words that would have produced exactly the observed feedback, excluding
/// words already guessed
fn filter_candidates<'a>(
    words: &'a [Word],
    history: &[(Word, [LetterStatus; WORD_LENGTH])],
) -> Vec<&'a Word> {
    words
        .iter()
        .filter(|&candidate| {
            history.iter().all(|(guess, statuses)| {
                guess != candidate && Feedback::calculate(guess, candidate).statuses() == *statuses
            })
        })
        .collect()
}

/// Highest summed frequency of distinct letters plus positional matches;
/// ties go to the alphabetically first word
fn best_by_letter_frequency<'a>(candidates: &[&'a Word]) -> Option<&'a Word> {
    let mut letter_counts = [0u32; 26];
    let mut positional = [[0u32; 26]; WORD_LENGTH];
    for word in candidates {
        let mut seen = [false; 26];
        for (pos, &b) in word.letters().iter().enumerate() {
            let idx = usize::from(b - b'A');
            positional[pos][idx] += 1;
            if !seen[idx] {
                seen[idx] = true;
                letter_counts[idx] += 1;
            }
        }
    }

    let score = |word: &Word| -> u32 {
        let mut seen = [false; 26];
        word.letters()
            .iter()
            .enumerate()
            .map(|(pos, &b)| {
                let idx = usize::from(b - b'A');
                let fresh = if seen[idx] { 0 } else { letter_counts[idx] };
                seen[idx] = true;
                fresh + positional[pos][idx]
            })
            .sum()
    };

    let mut best: Option<(&Word, u32)> = None;
    for &word in candidates {
        let s = score(word);
        if best.is_none_or(|(_, top)| s > top) {
            best = Some((word, s));
        }
    }
    best.map(|(w, _)| w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ResponseExtractor;
    use crate::game::Game;
    use crate::prompt::{PromptBuilder, PromptTemplate};

    fn vocabulary() -> Arc<Vocabulary> {
        Arc::new(Vocabulary::from_words([
            "slate", "crane", "erase", "trace", "grace", "brace", "place",
        ]))
    }

    #[test]
    fn parses_history_lines() {
        let prompt = "Previous Guesses:\n1. SLATE: S(absent) L(absent) A(correct) T(absent) E(correct)\n\nGuesses made: 1/6";
        let history = parse_history(prompt);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].0.text(), "SLATE");
        assert_eq!(history[0].1[2], LetterStatus::Correct);
        assert_eq!(history[0].1[0], LetterStatus::Absent);
    }

    #[test]
    fn ignores_lines_that_only_look_like_history() {
        assert!(parse_history_line("1. Each guess must be a valid 5-letter word").is_none());
        assert!(parse_history_line("- SLATE: S(absent)").is_none());
        assert!(parse_history_line("1. SLATE: X(absent) L(absent) A(correct) T(absent) E(correct)").is_none());
    }

    #[test]
    fn opens_with_default_opener() {
        let vocab = vocabulary();
        let game = Game::new(vocab.clone(), "crane").unwrap();
        let mut model = BaselineModel::new(vocab, ResponseStyle::Plain);

        let response = model.generate(&PromptTemplate::Simple.format(game.state())).unwrap();
        assert_eq!(response, "SLATE");
        assert!(model.usage().unwrap().prompt_tokens > 0);
    }

    #[test]
    fn only_suggests_words_consistent_with_feedback() {
        let vocab = vocabulary();
        let mut game = Game::new(vocab.clone(), "crane").unwrap();
        game.make_guess("slate", None).unwrap();
        let mut model = BaselineModel::new(vocab, ResponseStyle::Plain);

        let response = model.generate(&PromptTemplate::Simple.format(game.state())).unwrap();
        let guess = Word::new(&response).unwrap();
        let slate = Word::new("slate").unwrap();
        let target = Word::new("crane").unwrap();
        assert_eq!(
            Feedback::calculate(&slate, &guess).statuses(),
            Feedback::calculate(&slate, &target).statuses()
        );
    }

    #[test]
    fn solves_small_vocabulary() {
        let vocab = vocabulary();
        let mut game = Game::new(vocab.clone(), "grace").unwrap();
        let mut model = BaselineModel::new(vocab, ResponseStyle::Json);
        let extractor = ResponseExtractor::from_name("json-strict").unwrap();

        while !game.state().is_over() {
            let response = model.generate(&PromptTemplate::Json.format(game.state())).unwrap();
            let extraction = extractor.extract(&response).unwrap();
            game.make_guess(&extraction.guess, extraction.reasoning).unwrap();
        }
        assert!(game.state().won());
    }

    #[test]
    fn letter_frequency_prefers_common_letters() {
        let words: Vec<Word> = ["ABBEY", "CRANE", "TRACE", "GRACE"]
            .iter()
            .map(|w| Word::new(w).unwrap())
            .collect();
        let refs: Vec<&Word> = words.iter().collect();
        assert_ne!(best_by_letter_frequency(&refs).unwrap().text(), "ABBEY");
        assert!(best_by_letter_frequency(&[]).is_none());
    }
}
