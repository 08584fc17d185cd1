//! Attempt history and aggregate statistics over it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Choice, Question};
use crate::scoring::{grade, Grade, Score};

/// One submitted pass through a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    /// Unique attempt identifier.
    pub id: Uuid,
    /// Name of the quiz the attempt was taken on.
    pub quiz: String,
    /// When the attempt was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Questions in the order they were presented.
    pub questions: Vec<Question>,
    /// Selected answers, aligned with `questions`.
    pub answers: Vec<Option<Choice>>,
    /// Score derived from `questions` and `answers`.
    pub score: Score,
}

impl Attempt {
    /// Grade an answer sheet and record it as an attempt.
    pub fn record(quiz: &str, questions: Vec<Question>, answers: Vec<Option<Choice>>) -> Self {
        let score = grade(&questions, &answers).score;
        Self {
            id: Uuid::new_v4(),
            quiz: quiz.to_string(),
            submitted_at: Utc::now(),
            questions,
            answers,
            score,
        }
    }

    /// Re-derive per-question outcomes.
    pub fn grade(&self) -> Grade {
        grade(&self.questions, &self.answers)
    }
}

/// Ordered list of attempts in submission order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    attempts: Vec<Attempt>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attempt: Attempt) {
        self.attempts.push(attempt);
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn latest(&self) -> Option<&Attempt> {
        self.attempts.last()
    }

    /// Attempt with the highest score ratio; the earliest wins ties.
    pub fn best(&self) -> Option<&Attempt> {
        self.attempts.iter().fold(None, |best: Option<&Attempt>, a| match best {
            Some(b) if b.score.ratio() >= a.score.ratio() => Some(b),
            _ => Some(a),
        })
    }

    pub fn get(&self, index: usize) -> Option<&Attempt> {
        self.attempts.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attempt> {
        self.attempts.iter()
    }

    pub fn stats(&self) -> Option<HistoryStats> {
        HistoryStats::compute(self)
    }
}

/// Aggregate statistics across all attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryStats {
    pub attempts: usize,
    pub best_percent: f64,
    pub worst_percent: f64,
    pub mean_percent: f64,
    /// Change in percentage between the last two attempts.
    pub last_delta: Option<f64>,
}

impl HistoryStats {
    /// Returns `None` for an empty history.
    pub fn compute(history: &History) -> Option<Self> {
        if history.is_empty() {
            return None;
        }

        let percents: Vec<f64> = history.iter().map(|a| a.score.percent()).collect();
        let n = percents.len();
        let best = percents.iter().copied().fold(f64::MIN, f64::max);
        let worst = percents.iter().copied().fold(f64::MAX, f64::min);
        let mean = percents.iter().sum::<f64>() / n as f64;
        let last_delta = (n >= 2).then(|| percents[n - 1] - percents[n - 2]);

        Some(Self {
            attempts: n,
            best_percent: best,
            worst_percent: worst,
            mean_percent: mean,
            last_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                text: format!("Question {i}"),
                options: vec!["yes".into(), "no".into()],
                raw_answer: "A".into(),
                answer: Choice::from_index(0),
            })
            .collect()
    }

    fn attempt_with(correct: usize, total: usize) -> Attempt {
        let answers = (0..total)
            .map(|i| Choice::from_index(if i < correct { 0 } else { 1 }))
            .collect();
        Attempt::record("test", questions(total), answers)
    }

    #[test]
    fn record_computes_score() {
        let attempt = attempt_with(3, 4);
        assert_eq!(attempt.score, Score { correct: 3, total: 4 });
        assert_eq!(attempt.quiz, "test");
        assert_eq!(attempt.grade().outcomes.len(), 4);
    }

    #[test]
    fn best_and_latest() {
        let mut history = History::new();
        assert!(history.best().is_none());
        assert!(history.stats().is_none());

        history.push(attempt_with(1, 4));
        history.push(attempt_with(4, 4));
        history.push(attempt_with(2, 4));

        assert_eq!(history.len(), 3);
        assert_eq!(history.best().unwrap().score.correct, 4);
        assert_eq!(history.latest().unwrap().score.correct, 2);
    }

    #[test]
    fn best_prefers_earliest_on_tie() {
        let mut history = History::new();
        let first = attempt_with(2, 2);
        let first_id = first.id;
        history.push(first);
        history.push(attempt_with(2, 2));
        assert_eq!(history.best().unwrap().id, first_id);
    }

    #[test]
    fn stats_over_attempts() {
        let mut history = History::new();
        history.push(attempt_with(1, 4));
        history.push(attempt_with(3, 4));

        let stats = history.stats().unwrap();
        assert_eq!(stats.attempts, 2);
        assert!((stats.best_percent - 75.0).abs() < 1e-9);
        assert!((stats.worst_percent - 25.0).abs() < 1e-9);
        assert!((stats.mean_percent - 50.0).abs() < 1e-9);
        assert!((stats.last_delta.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn single_attempt_has_no_delta() {
        let mut history = History::new();
        history.push(attempt_with(1, 1));
        assert!(history.stats().unwrap().last_delta.is_none());
    }
}
