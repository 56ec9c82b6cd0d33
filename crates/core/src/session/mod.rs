use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    answer,
    srs::{Difficulty, WordProgress},
    PracticeError, Result,
};

/// A vocabulary entry as served by the lesson backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub id: u32,
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub progress: WordProgress,
}

/// Outcome of checking one typed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub expected: String,
}

/// Result reported after the learner rates a card.
#[derive(Debug, Clone, Copy)]
pub struct PracticeResult {
    pub word_id: u32,
    pub correct: bool,
    pub difficulty: Difficulty,
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub correct: u32,
    pub incorrect: u32,
    pub total: usize,
}

/// Flashcard practice run over a fixed word list.
///
/// Navigation is clamped at both ends; moving between cards clears the
/// flip state and any pending feedback, matching how the practice UI
/// resets between cards.
#[derive(Debug)]
pub struct PracticeSession {
    words: Vec<VocabularyWord>,
    current_index: usize,
    correct_answers: u32,
    incorrect_answers: u32,
    is_flipped: bool,
    feedback: Option<Feedback>,
}

impl PracticeSession {
    pub fn new(words: Vec<VocabularyWord>) -> Result<Self> {
        if words.is_empty() {
            return Err(PracticeError::invalid(
                "a practice session requires at least one word",
            ));
        }
        Ok(Self {
            words,
            current_index: 0,
            correct_answers: 0,
            incorrect_answers: 0,
            is_flipped: false,
            feedback: None,
        })
    }

    pub fn current_word(&self) -> &VocabularyWord {
        &self.words[self.current_index]
    }

    pub fn is_last_word(&self) -> bool {
        self.current_index == self.words.len() - 1
    }

    /// Moves to the next card. Returns `false` when already at the end.
    pub fn advance(&mut self) -> bool {
        if self.is_last_word() {
            return false;
        }
        self.current_index += 1;
        self.clear_card_state();
        true
    }

    /// Moves to the previous card. Returns `false` when already at the start.
    pub fn go_back(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.clear_card_state();
        true
    }

    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Percentage of the session reached, counting the current card.
    pub fn progress(&self) -> f32 {
        (self.current_index + 1) as f32 / self.words.len() as f32 * 100.0
    }

    /// Checks a typed answer against the current word and records the
    /// feedback so the caller can re-read it until the next card.
    pub fn check_answer(&mut self, typed: &str) -> Feedback {
        let current = self.current_word();
        let feedback = Feedback {
            correct: answer::is_exact_match(typed, &current.word),
            expected: current.word.clone(),
        };
        self.feedback = Some(feedback.clone());
        feedback
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Applies a rated review outcome to the word and the session tallies.
    pub fn record_result(&mut self, result: PracticeResult, on: NaiveDate) -> Result<()> {
        let word = self
            .words
            .iter_mut()
            .find(|word| word.id == result.word_id)
            .ok_or_else(|| {
                PracticeError::invalid(format!("no word with id {} in session", result.word_id))
            })?;

        word.progress.record(result.correct, result.difficulty, on);
        if result.correct {
            self.correct_answers += 1;
        } else {
            self.incorrect_answers += 1;
        }
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.correct_answers,
            incorrect: self.incorrect_answers,
            total: self.words.len(),
        }
    }

    pub fn words(&self) -> &[VocabularyWord] {
        &self.words
    }

    fn clear_card_state(&mut self) {
        self.is_flipped = false;
        self.feedback = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(id: u32, word: &str, meaning: &str) -> VocabularyWord {
        VocabularyWord {
            id,
            word: word.to_string(),
            meaning: meaning.to_string(),
            example: None,
            level: None,
            progress: WordProgress::default(),
        }
    }

    fn session() -> PracticeSession {
        PracticeSession::new(vec![
            word(1, "achieve", "đạt được"),
            word(2, "improve", "cải thiện"),
            word(3, "maintain", "duy trì"),
        ])
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
    }

    #[test]
    fn empty_word_lists_are_rejected() {
        assert!(PracticeSession::new(Vec::new()).is_err());
    }

    #[test]
    fn navigation_is_clamped_at_both_ends() {
        let mut session = session();
        assert!(!session.go_back());
        assert!(session.advance());
        assert!(session.advance());
        assert!(session.is_last_word());
        assert!(!session.advance());
        assert!(session.go_back());
        assert_eq!(session.current_word().id, 2);
    }

    #[test]
    fn navigation_clears_flip_and_feedback() {
        let mut session = session();
        session.flip();
        session.check_answer("wrong");
        assert!(session.is_flipped());
        assert!(session.feedback().is_some());

        session.advance();
        assert!(!session.is_flipped());
        assert!(session.feedback().is_none());
    }

    #[test]
    fn answers_are_checked_against_the_current_word() {
        let mut session = session();
        let feedback = session.check_answer("  Achieve ");
        assert!(feedback.correct);
        assert_eq!(feedback.expected, "achieve");

        session.advance();
        assert!(!session.check_answer("achieve").correct);
    }

    #[test]
    fn recording_results_updates_word_and_tallies() {
        let mut session = session();
        session
            .record_result(
                PracticeResult {
                    word_id: 1,
                    correct: true,
                    difficulty: Difficulty::Easy,
                },
                today(),
            )
            .unwrap();
        session
            .record_result(
                PracticeResult {
                    word_id: 2,
                    correct: false,
                    difficulty: Difficulty::Hard,
                },
                today(),
            )
            .unwrap();

        let summary = session.summary();
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(summary.total, 3);

        let first = &session.words()[0];
        assert_eq!(first.progress.correct_count, 1);
        assert_eq!(
            first.progress.next_review,
            Some(NaiveDate::from_ymd_opt(2026, 4, 8).unwrap())
        );
    }

    #[test]
    fn unknown_word_ids_are_rejected() {
        let mut session = session();
        let result = session.record_result(
            PracticeResult {
                word_id: 99,
                correct: true,
                difficulty: Difficulty::Easy,
            },
            today(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn progress_counts_the_current_card() {
        let mut session = session();
        assert!((session.progress() - 33.333_332).abs() < 0.001);
        session.advance();
        session.advance();
        assert_eq!(session.progress(), 100.0);
    }
}
