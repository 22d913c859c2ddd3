//! Property-based tests for scoring, vocabulary and extraction.

use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use wordle_bench::core::{Feedback, LetterStatus, WORD_LENGTH, Word};
use wordle_bench::extract::ResponseExtractor;
use wordle_bench::game::{Game, GameStatus, MAX_GUESSES};
use wordle_bench::session::golf_score;
use wordle_bench::vocabulary::Vocabulary;

prop_compose! {
    fn arbitrary_word()(text in "[a-zA-Z]{5}") -> Word {
        Word::new(text).unwrap()
    }
}

prop_compose! {
    /// Words over a tiny alphabet, so repeated letters are common
    fn repetitive_word()(text in "[abe]{5}") -> Word {
        Word::new(text).unwrap()
    }
}

fn count(word: &Word, letter: u8) -> usize {
    word.letters().iter().filter(|&&b| b == letter).count()
}

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("wordle_bench_prop_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn vocabulary(&self) -> Vocabulary {
        let base = self.0.join("valid-words.txt");
        fs::write(&base, "crane\nslate\n").unwrap();
        Vocabulary::new(base, self.0.join("added.log"))
    }

    fn log_lines(&self) -> usize {
        fs::read_to_string(self.0.join("added.log"))
            .map(|content| content.lines().count())
            .unwrap_or(0)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

proptest! {
    #[test]
    fn feedback_never_overclaims_letters(guess in repetitive_word(), target in repetitive_word()) {
        let feedback = Feedback::calculate(&guess, &target);
        prop_assert_eq!(feedback.letters().len(), WORD_LENGTH);

        for letter in [b'A', b'B', b'E'] {
            let claimed = feedback
                .letters()
                .iter()
                .filter(|e| e.letter == char::from(letter) && e.status != LetterStatus::Absent)
                .count();
            prop_assert!(claimed <= count(&target, letter));
        }
    }

    #[test]
    fn feedback_marks_exact_positions_correct(guess in arbitrary_word(), target in arbitrary_word()) {
        let feedback = Feedback::calculate(&guess, &target);
        for (i, e) in feedback.letters().iter().enumerate() {
            prop_assert_eq!(e.position, i);
            let same = guess.letters()[i] == target.letters()[i];
            prop_assert_eq!(e.status == LetterStatus::Correct, same);
        }
    }

    #[test]
    fn feedback_solved_iff_equal(guess in arbitrary_word(), target in arbitrary_word()) {
        prop_assert_eq!(Feedback::calculate(&guess, &target).is_solved(), guess == target);
    }

    #[test]
    fn add_is_idempotent(word in "[a-z]{5}") {
        let dir = TempDir::new();
        let vocabulary = dir.vocabulary();
        let known = vocabulary.is_valid(&word).unwrap();

        vocabulary.add(&word).unwrap();
        let after_once = vocabulary.len().unwrap();
        let lines_once = dir.log_lines();
        prop_assert!(!vocabulary.add(&word).unwrap());

        prop_assert!(vocabulary.is_valid(&word.to_uppercase()).unwrap());
        prop_assert_eq!(vocabulary.len().unwrap(), after_once);
        prop_assert_eq!(dir.log_lines(), lines_once);
        prop_assert_eq!(lines_once, usize::from(!known));
    }

    #[test]
    fn additions_survive_reload(word in "[a-z]{5}") {
        let dir = TempDir::new();
        dir.vocabulary().add(&word).unwrap();
        prop_assert!(dir.vocabulary().is_valid(&word).unwrap());
    }

    #[test]
    fn game_ends_within_six_guesses(guesses in prop::collection::vec(0..4usize, 1..12)) {
        let words = ["crane", "slate", "irate", "trace"];
        let vocabulary = Arc::new(Vocabulary::from_words(words));
        let mut game = Game::new(vocabulary, "trace").unwrap();

        for i in guesses {
            let before = game.state().guesses_made();
            match game.make_guess(words[i], None) {
                Ok(outcome) => {
                    prop_assert_eq!(game.state().guesses_made(), before + 1);
                    prop_assert_eq!(outcome.target_word.is_some(), outcome.status.is_terminal());
                }
                Err(_) => {
                    prop_assert!(game.status().is_terminal());
                }
            }
            prop_assert_eq!(
                game.state().guesses_made() + game.state().guesses_remaining(),
                MAX_GUESSES
            );
        }

        if let Some(score) = golf_score(game.status(), game.state().guesses_made()) {
            match game.status() {
                GameStatus::Won => {
                    prop_assert!((-3..=2).contains(&score));
                }
                _ => {
                    prop_assert_eq!(score, 4);
                }
            }
        }
    }

    #[test]
    fn simple_extraction_finds_quoted_word(word in "[a-z]{5}", prefix in "[a-z ]{0,20}") {
        let response = format!("{prefix} my guess is \"{word}\".");
        let extraction = ResponseExtractor::Simple.extract(&response).unwrap();
        prop_assert_eq!(extraction.guess, word.to_uppercase());
    }

    #[test]
    fn json_extraction_uppercases_guess(word in "[a-zA-Z]{5}") {
        let response = serde_json::json!({ "guess": word, "reasoning": "why not" }).to_string();
        let extraction = ResponseExtractor::from_name("json-strict").unwrap().extract(&response).unwrap();
        prop_assert_eq!(extraction.guess, word.to_uppercase());
        prop_assert_eq!(extraction.reasoning.as_deref(), Some("why not"));
    }
}
