use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// How hard the learner judged a word after reviewing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Hard,
    Medium,
    Easy,
    Known,
}

/// Days until the next review for a difficulty rating.
pub fn review_offset_days(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Hard => 1,
        Difficulty::Medium => 3,
        Difficulty::Easy => 7,
        Difficulty::Known => 30,
    }
}

/// Schedules the next review relative to the supplied reference date. The
/// caller passes "today" explicitly so scheduling stays deterministic.
pub fn next_review_date(difficulty: Difficulty, from: NaiveDate) -> NaiveDate {
    from + Duration::days(review_offset_days(difficulty))
}

/// Review history tracked per vocabulary word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordProgress {
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub last_reviewed: Option<NaiveDate>,
    pub next_review: Option<NaiveDate>,
}

impl WordProgress {
    /// Applies the outcome of one review: bumps the matching counter,
    /// stamps the review date, and schedules the next one.
    pub fn record(&mut self, correct: bool, difficulty: Difficulty, on: NaiveDate) {
        if correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.last_reviewed = Some(on);
        self.next_review = Some(next_review_date(difficulty, on));
    }

    /// A word is due when it has never been reviewed or its scheduled
    /// review date has arrived.
    pub fn is_due(&self, on: NaiveDate) -> bool {
        self.next_review.map(|date| date <= on).unwrap_or(true)
    }
}
