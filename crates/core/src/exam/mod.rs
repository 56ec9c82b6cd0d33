use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{PracticeError, Result};

/// One scorable question: its number and the correct option label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub question_no: u32,
    pub correct_option: String,
}

/// Answer state for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionStatus {
    Unanswered,
    Answered {
        selected: String,
        correct: bool,
    },
}

/// Aggregate result of a submitted answer sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

/// Tracks selected options across a mock test.
///
/// Questions keep their document order for review; selections live in a
/// map keyed by question number and may be changed until scoring.
#[derive(Debug, Default)]
pub struct AnswerSheet {
    questions: Vec<ExamQuestion>,
    selected: HashMap<u32, String>,
}

impl AnswerSheet {
    pub fn new(questions: Vec<ExamQuestion>) -> Self {
        Self {
            questions,
            selected: HashMap::new(),
        }
    }

    /// Records (or overwrites) the selected option for a question.
    pub fn select(&mut self, question_no: u32, option: impl Into<String>) -> Result<()> {
        if !self
            .questions
            .iter()
            .any(|question| question.question_no == question_no)
        {
            return Err(PracticeError::invalid(format!(
                "unknown question number {question_no}"
            )));
        }
        self.selected.insert(question_no, option.into());
        Ok(())
    }

    /// Returns the answer state for a question.
    pub fn status(&self, question_no: u32) -> QuestionStatus {
        let Some(selected) = self.selected.get(&question_no) else {
            return QuestionStatus::Unanswered;
        };
        let correct = self
            .questions
            .iter()
            .find(|question| question.question_no == question_no)
            .map(|question| question.correct_option == *selected)
            .unwrap_or(false);
        QuestionStatus::Answered {
            selected: selected.clone(),
            correct,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.selected.len()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Percentage of questions answered so far, in [0, 100].
    pub fn progress(&self) -> f32 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.answered_count() as f32 / self.total() as f32 * 100.0
    }

    /// Scores the sheet: a question counts when its selected option equals
    /// the correct one.
    pub fn score(&self) -> Score {
        let correct = self
            .questions
            .iter()
            .filter(|question| {
                self.selected.get(&question.question_no) == Some(&question.correct_option)
            })
            .count();
        Score {
            correct,
            total: self.total(),
        }
    }

    pub fn questions(&self) -> &[ExamQuestion] {
        &self.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(no: u32, correct: &str) -> ExamQuestion {
        ExamQuestion {
            question_no: no,
            correct_option: correct.to_string(),
        }
    }

    fn sheet() -> AnswerSheet {
        AnswerSheet::new(vec![
            question(1, "A"),
            question(2, "C"),
            question(3, "B"),
        ])
    }

    #[test]
    fn selections_are_tracked_and_overwritable() {
        let mut sheet = sheet();
        sheet.select(1, "B").unwrap();
        assert_eq!(
            sheet.status(1),
            QuestionStatus::Answered {
                selected: "B".to_string(),
                correct: false,
            }
        );

        sheet.select(1, "A").unwrap();
        assert_eq!(
            sheet.status(1),
            QuestionStatus::Answered {
                selected: "A".to_string(),
                correct: true,
            }
        );
        assert_eq!(sheet.answered_count(), 1);
    }

    #[test]
    fn unknown_questions_are_rejected() {
        let mut sheet = sheet();
        assert!(sheet.select(99, "A").is_err());
    }

    #[test]
    fn unanswered_questions_report_as_such() {
        let sheet = sheet();
        assert_eq!(sheet.status(2), QuestionStatus::Unanswered);
    }

    #[test]
    fn scoring_counts_matching_selections() {
        let mut sheet = sheet();
        sheet.select(1, "A").unwrap();
        sheet.select(2, "B").unwrap();

        let score = sheet.score();
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 3);
    }

    #[test]
    fn progress_reflects_answered_share() {
        let mut sheet = sheet();
        assert_eq!(sheet.progress(), 0.0);

        sheet.select(1, "A").unwrap();
        sheet.select(2, "C").unwrap();
        assert!((sheet.progress() - 66.666_664).abs() < 0.001);
    }

    #[test]
    fn empty_sheets_have_zero_progress() {
        let sheet = AnswerSheet::new(Vec::new());
        assert_eq!(sheet.progress(), 0.0);
        assert_eq!(sheet.score(), Score { correct: 0, total: 0 });
    }
}
