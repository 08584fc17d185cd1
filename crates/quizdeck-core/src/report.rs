//! Attempt review rendering: per-question "your answer / correct" rows as
//! plain text, markdown, or JSON.

use serde::{Deserialize, Serialize};

use crate::history::{Attempt, History};
use crate::model::{Choice, Question};
use crate::scoring::{Outcome, Score};

/// A reviewable summary of one attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReview {
    /// One-based attempt number within the history.
    pub number: usize,
    pub quiz: String,
    pub score: Score,
    pub rows: Vec<ReviewRow>,
}

/// One question of a reviewed attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    pub question: String,
    pub selected: Option<String>,
    pub correct: String,
    pub outcome: Outcome,
}

/// Format a choice as `"B. Rome"`, or just `"B"` when the option is blank.
fn describe(question: &Question, choice: Choice) -> String {
    match question.option_text(choice) {
        Some(text) if !text.is_empty() => format!("{choice}. {text}"),
        _ => choice.to_string(),
    }
}

impl AttemptReview {
    pub fn from_attempt(number: usize, attempt: &Attempt) -> Self {
        let grade = attempt.grade();
        let rows = attempt
            .questions
            .iter()
            .zip(grade.outcomes)
            .enumerate()
            .map(|(i, (q, outcome))| {
                let selected = attempt
                    .answers
                    .get(i)
                    .copied()
                    .flatten()
                    .map(|c| describe(q, c));
                let correct = match q.answer {
                    Some(c) => describe(q, c),
                    None => format!("{} (unresolved)", q.raw_answer),
                };
                ReviewRow {
                    question: q.text.clone(),
                    selected,
                    correct,
                    outcome,
                }
            })
            .collect();

        Self {
            number,
            quiz: attempt.quiz.clone(),
            score: grade.score,
            rows,
        }
    }

    /// Review every attempt in a history, numbered from 1.
    pub fn all(history: &History) -> Vec<Self> {
        history
            .iter()
            .enumerate()
            .map(|(i, a)| Self::from_attempt(i + 1, a))
            .collect()
    }

    pub fn to_text(&self) -> String {
        let mut out = format!(
            "Attempt {} - {} - Score: {} ({:.0}%)\n",
            self.number,
            self.quiz,
            self.score,
            self.score.percent()
        );

        for (i, row) in self.rows.iter().enumerate() {
            let mark = match row.outcome {
                Outcome::Correct => "+",
                Outcome::Wrong => "x",
                Outcome::Unanswered => "-",
            };
            out.push_str(&format!("  [{mark}] {}. {}\n", i + 1, row.question));
            out.push_str(&format!(
                "        Your answer: {}\n",
                row.selected.as_deref().unwrap_or("(none)")
            ));
            if row.outcome != Outcome::Correct {
                out.push_str(&format!("        Correct: {}\n", row.correct));
            }
        }

        out
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "### Attempt {} - {}\n\n**Score:** {} ({:.1}%)\n\n",
            self.number,
            self.quiz,
            self.score,
            self.score.percent()
        ));

        md.push_str("| # | Question | Your answer | Correct | Result |\n");
        md.push_str("|---|----------|-------------|---------|--------|\n");
        for (i, row) in self.rows.iter().enumerate() {
            let result = match row.outcome {
                Outcome::Correct => "correct",
                Outcome::Wrong => "wrong",
                Outcome::Unanswered => "unanswered",
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                i + 1,
                escape_cell(&row.question),
                escape_cell(row.selected.as_deref().unwrap_or("")),
                escape_cell(&row.correct),
                result
            ));
        }

        md
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt() -> Attempt {
        let questions = vec![
            Question {
                text: "Capital of Italy?".into(),
                options: vec!["Paris".into(), "Rome".into()],
                raw_answer: "Rome".into(),
                answer: Choice::from_index(1),
            },
            Question {
                text: "a | b?".into(),
                options: vec!["yes".into(), "no".into()],
                raw_answer: "A".into(),
                answer: Choice::from_index(0),
            },
            Question {
                text: "Broken key?".into(),
                options: vec!["x".into(), "y".into()],
                raw_answer: "Z".into(),
                answer: None,
            },
        ];
        let answers = vec![Choice::from_index(1), Choice::from_index(1), None];
        Attempt::record("geo", questions, answers)
    }

    #[test]
    fn rows_describe_answers() {
        let review = AttemptReview::from_attempt(1, &attempt());
        assert_eq!(review.score, Score { correct: 1, total: 3 });
        assert_eq!(review.rows[0].selected.as_deref(), Some("B. Rome"));
        assert_eq!(review.rows[0].outcome, Outcome::Correct);
        assert_eq!(review.rows[1].correct, "A. yes");
        assert_eq!(review.rows[1].outcome, Outcome::Wrong);
        assert_eq!(review.rows[2].selected, None);
        assert_eq!(review.rows[2].correct, "Z (unresolved)");
        assert_eq!(review.rows[2].outcome, Outcome::Unanswered);
    }

    #[test]
    fn text_output() {
        let text = AttemptReview::from_attempt(2, &attempt()).to_text();
        assert!(text.starts_with("Attempt 2 - geo - Score: 1 / 3"));
        assert!(text.contains("Your answer: (none)"));
        assert!(text.contains("Correct: A. yes"));
    }

    #[test]
    fn markdown_escapes_pipes() {
        let md = AttemptReview::from_attempt(1, &attempt()).to_markdown();
        assert!(md.contains("### Attempt 1"));
        assert!(md.contains("a \\| b?"));
        assert!(md.contains("| 1 | Capital of Italy? | B. Rome | B. Rome | correct |"));
    }

    #[test]
    fn review_all_numbers_from_one() {
        let mut history = History::new();
        history.push(attempt());
        history.push(attempt());
        let reviews = AttemptReview::all(&history);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].number, 2);
    }
}
