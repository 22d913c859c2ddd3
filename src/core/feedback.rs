//! Guess scoring
//!
//! Produces per-letter feedback for a guess against a target, following
//! Wordle's exact duplicate-letter rules:
//!
//! 1. Count the letters available in the target
//! 2. First pass: exact position matches are CORRECT and consume one letter
//! 3. Second pass (left to right): a remaining letter is PRESENT and consumes
//!    one letter, otherwise ABSENT
//!
//! Each physical letter in the target is therefore claimed by at most one
//! guess position, and correct positions win over earlier present matches.

use super::word::{WORD_LENGTH, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single guess letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    /// Right letter, right position (green)
    Correct,
    /// Letter is in the word at another position (yellow)
    Present,
    /// Letter is not in the word, or all its occurrences are claimed (gray)
    Absent,
}

impl LetterStatus {
    /// Lowercase name as shown to models
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬛',
        }
    }
}

impl fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feedback for one letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterEvaluation {
    /// Position in the word (0-4)
    pub position: usize,
    pub letter: char,
    pub status: LetterStatus,
}

/// Feedback for a whole guess: exactly one evaluation per position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback([LetterEvaluation; WORD_LENGTH]);

impl Feedback {
    /// Score `guess` against `target`
    ///
    /// # Examples
    /// ```
    /// use wordle_bench::core::{Feedback, LetterStatus::*, Word};
    ///
    /// let target = Word::new("crane").unwrap();
    /// let guess = Word::new("erase").unwrap();
    /// let feedback = Feedback::calculate(&guess, &target);
    ///
    /// // The single E in CRANE is claimed by the correct E at position 4
    /// assert_eq!(feedback.statuses(), [Absent, Correct, Correct, Absent, Correct]);
    /// ```
    #[must_use]
    #[allow(clippy::needless_range_loop)] // Index needed to pair guess[i] with target[i] and statuses[i]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let guess_letters = guess.letters();
        let target_letters = target.letters();
        let mut available = target.letter_counts();
        let mut statuses = [LetterStatus::Absent; WORD_LENGTH];

        // First pass: greens
        for i in 0..WORD_LENGTH {
            if guess_letters[i] == target_letters[i] {
                statuses[i] = LetterStatus::Correct;
                if let Some(count) = available.get_mut(&guess_letters[i]) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: yellows from whatever is left
        for i in 0..WORD_LENGTH {
            if statuses[i] == LetterStatus::Correct {
                continue;
            }
            if let Some(count) = available.get_mut(&guess_letters[i])
                && *count > 0
            {
                statuses[i] = LetterStatus::Present;
                *count -= 1;
            }
        }

        Self(std::array::from_fn(|position| LetterEvaluation {
            position,
            letter: char::from(guess_letters[position]),
            status: statuses[position],
        }))
    }

    /// Per-letter evaluations in position order
    #[must_use]
    pub const fn letters(&self) -> &[LetterEvaluation; WORD_LENGTH] {
        &self.0
    }

    /// Just the statuses, in position order
    #[must_use]
    pub fn statuses(&self) -> [LetterStatus; WORD_LENGTH] {
        self.0.map(|e| e.status)
    }

    /// All five letters correct
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|e| e.status == LetterStatus::Correct)
    }

    /// Render as a row of colored squares, e.g. "⬛🟩🟩⬛🟩"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|e| e.status.emoji()).collect()
    }

    /// Render as `L(status)` pairs, the form models see in prompts
    #[must_use]
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|e| format!("{}({})", e.letter, e.status))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::LetterStatus::{Absent, Correct, Present};
    use super::*;

    fn score(guess: &str, target: &str) -> [LetterStatus; WORD_LENGTH] {
        Feedback::calculate(&Word::new(guess).unwrap(), &Word::new(target).unwrap()).statuses()
    }

    #[test]
    fn all_correct() {
        assert_eq!(score("crane", "crane"), [Correct; 5]);
        let word = Word::new("crane").unwrap();
        assert!(Feedback::calculate(&word, &word).is_solved());
    }

    #[test]
    fn all_absent() {
        assert_eq!(score("built", "crane"), [Absent; 5]);
    }

    #[test]
    fn single_target_letter_claimed_by_correct_position() {
        assert_eq!(
            score("erase", "crane"),
            [Absent, Correct, Correct, Absent, Correct]
        );
    }

    #[test]
    fn duplicate_letters_in_both_words() {
        assert_eq!(
            score("suede", "speed"),
            [Correct, Absent, Correct, Present, Present]
        );
    }

    #[test]
    fn earlier_duplicate_is_present_when_target_has_two() {
        // ROBOT vs FLOOR: first O yellow, second O green
        assert_eq!(
            score("robot", "floor"),
            [Present, Present, Absent, Correct, Absent]
        );
    }

    #[test]
    fn leftmost_present_wins_when_letter_is_scarce() {
        // One L in the target, guessed twice out of position
        assert_eq!(
            score("llama", "hotel"),
            [Present, Absent, Absent, Absent, Absent]
        );
    }

    #[test]
    fn letter_evaluations_carry_position_and_letter() {
        let feedback =
            Feedback::calculate(&Word::new("slate").unwrap(), &Word::new("crane").unwrap());
        for (i, eval) in feedback.letters().iter().enumerate() {
            assert_eq!(eval.position, i);
        }
        assert_eq!(feedback.letters()[0].letter, 'S');
        assert_eq!(feedback.letters()[2].status, Correct);
    }

    #[test]
    fn emoji_and_description() {
        let feedback =
            Feedback::calculate(&Word::new("erase").unwrap(), &Word::new("crane").unwrap());
        assert_eq!(feedback.to_emoji(), "⬛🟩🟩⬛🟩");
        assert_eq!(
            feedback.describe(),
            "E(absent) R(correct) A(correct) S(absent) E(correct)"
        );
    }

    #[test]
    fn serializes_as_list_of_letters() {
        let feedback =
            Feedback::calculate(&Word::new("crane").unwrap(), &Word::new("crane").unwrap());
        let json = serde_json::to_value(feedback).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[0]["status"], "correct");
        assert_eq!(json[0]["letter"], "C");
    }
}
