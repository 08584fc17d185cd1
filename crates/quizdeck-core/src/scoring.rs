//! Scoring of answer sheets against a question set.

use serde::{Deserialize, Serialize};

use crate::model::{Choice, Question};

/// Number of correct answers out of the number of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Fraction of questions answered correctly, in `[0.0, 1.0]`.
    ///
    /// An empty quiz scores `0.0`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.correct, self.total)
    }
}

/// How a single question was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Wrong,
    Unanswered,
}

/// Per-question outcomes plus the overall score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub score: Score,
    pub outcomes: Vec<Outcome>,
}

/// Grade `answers` against `questions` position by position.
///
/// A position counts as correct only when a selection exists and equals the
/// resolved answer. Missing trailing answers count as unanswered.
pub fn grade(questions: &[Question], answers: &[Option<Choice>]) -> Grade {
    let outcomes: Vec<Outcome> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| match answers.get(i).copied().flatten() {
            None => Outcome::Unanswered,
            Some(choice) if q.is_correct(Some(choice)) => Outcome::Correct,
            Some(_) => Outcome::Wrong,
        })
        .collect();

    let correct = outcomes.iter().filter(|o| **o == Outcome::Correct).count();

    Grade {
        score: Score {
            correct,
            total: questions.len(),
        },
        outcomes,
    }
}

/// Parse a comma-separated answer sheet such as `"A,b,,D"`.
///
/// Empty entries (and `-`) mean "no answer" for that position.
pub fn parse_answer_sheet(sheet: &str) -> Result<Vec<Option<Choice>>, String> {
    if sheet.trim().is_empty() {
        return Ok(Vec::new());
    }

    sheet
        .split(',')
        .enumerate()
        .map(|(i, entry)| match entry.trim() {
            "" | "-" => Ok(None),
            other => other
                .parse::<Choice>()
                .map(Some)
                .map_err(|e| format!("answer {}: {e}", i + 1)),
        })
        .collect()
}
