//! The quiz session state machine.
//!
//! A session moves between two phases:
//!
//! - **in progress**: the user selects answers and navigates between
//!   questions. Advancing requires a selection on the current question.
//! - **submitted**: the attempt has been scored and recorded in the history.
//!   `retry` and `reshuffle` start a fresh attempt.
//!
//! Loading a new quiz replaces the question set but keeps the history.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SessionError;
use crate::history::{Attempt, History};
use crate::model::{Choice, Question, Quiz};

type Result<T> = std::result::Result<T, SessionError>;

/// In-memory state for one user working through quizzes.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    quiz_name: String,
    questions: Vec<Question>,
    selections: Vec<Option<Choice>>,
    current: usize,
    submitted: bool,
    history: History,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the question set and start a fresh attempt.
    ///
    /// An empty quiz is rejected and leaves the session untouched.
    pub fn load(&mut self, quiz: Quiz) -> Result<()> {
        if quiz.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        tracing::info!("loaded quiz `{}` ({} questions)", quiz.name, quiz.len());
        self.quiz_name = quiz.name;
        self.questions = quiz.questions;
        self.reset();
        Ok(())
    }

    pub fn quiz_name(&self) -> &str {
        &self.quiz_name
    }

    pub fn is_loaded(&self) -> bool {
        !self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based index of the question on screen.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn current_selection(&self) -> Option<Choice> {
        self.selections.get(self.current).copied().flatten()
    }

    pub fn selections(&self) -> &[Option<Choice>] {
        &self.selections
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_last(&self) -> bool {
        !self.questions.is_empty() && self.current == self.questions.len() - 1
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether `next` would move forward.
    pub fn can_advance(&self) -> bool {
        !self.submitted && !self.is_last() && self.current_selection().is_some()
    }

    /// Whether `submit` would be accepted.
    pub fn can_submit(&self) -> bool {
        !self.submitted && self.is_last() && self.current_selection().is_some()
    }

    /// Record `choice` for the current question, replacing any earlier pick.
    pub fn select(&mut self, choice: Choice) -> Result<()> {
        self.ensure_in_progress()?;

        let question = &self.questions[self.current];
        if !question.has_option(choice) {
            return Err(SessionError::InvalidChoice {
                choice,
                available: question.options.len(),
            });
        }

        tracing::debug!("question {}: selected {choice}", self.current + 1);
        self.selections[self.current] = Some(choice);
        Ok(())
    }

    /// Move to the next question. A no-op on the last question.
    pub fn next(&mut self) -> Result<usize> {
        self.ensure_in_progress()?;

        if self.current_selection().is_none() {
            return Err(SessionError::NoSelection {
                question: self.current + 1,
            });
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
        Ok(self.current)
    }

    /// Move to the previous question. A no-op on the first question.
    pub fn back(&mut self) -> Result<usize> {
        self.ensure_in_progress()?;

        self.current = self.current.saturating_sub(1);
        Ok(self.current)
    }

    /// Score the attempt and append it to the history.
    pub fn submit(&mut self) -> Result<&Attempt> {
        self.ensure_in_progress()?;

        if !self.is_last() {
            return Err(SessionError::NotOnLastQuestion {
                current: self.current + 1,
                total: self.questions.len(),
            });
        }
        if self.current_selection().is_none() {
            return Err(SessionError::NoSelection {
                question: self.current + 1,
            });
        }

        let attempt = Attempt::record(
            &self.quiz_name,
            self.questions.clone(),
            self.selections.clone(),
        );
        tracing::info!(
            "submitted attempt {} on `{}`: {}",
            self.history.len() + 1,
            self.quiz_name,
            attempt.score
        );

        self.submitted = true;
        self.history.push(attempt);
        self.last_attempt()
    }

    /// The attempt produced by the most recent `submit`.
    pub fn last_attempt(&self) -> Result<&Attempt> {
        if !self.submitted {
            return Err(SessionError::NotSubmitted);
        }
        self.history.latest().ok_or(SessionError::NotSubmitted)
    }

    /// Start over with the same question order.
    pub fn retry(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        tracing::debug!("retrying `{}`", self.quiz_name);
        self.reset();
        Ok(())
    }

    /// Start over with the questions in a new random order.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_loaded()?;
        tracing::debug!("reshuffling `{}`", self.quiz_name);
        self.questions.shuffle(rng);
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.selections = vec![None; self.questions.len()];
        self.current = 0;
        self.submitted = false;
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<()> {
        self.ensure_loaded()?;
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiz(n: usize) -> Quiz {
        Quiz {
            name: "sample".into(),
            questions: (0..n)
                .map(|i| Question {
                    text: format!("Question {i}"),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    raw_answer: "B".into(),
                    answer: Choice::from_index(1),
                })
                .collect(),
            skipped_rows: 0,
        }
    }

    fn pick(i: usize) -> Choice {
        Choice::from_index(i).unwrap()
    }

    fn loaded(n: usize) -> QuizSession {
        let mut session = QuizSession::new();
        session.load(quiz(n)).unwrap();
        session
    }

    fn answer_all(session: &mut QuizSession, choice: Choice) {
        for _ in 0..session.len() {
            session.select(choice).unwrap();
            session.next().unwrap();
        }
    }

    #[test]
    fn empty_session_rejects_everything() {
        let mut session = QuizSession::new();
        assert_eq!(session.select(pick(0)), Err(SessionError::NoQuestions));
        assert_eq!(session.next(), Err(SessionError::NoQuestions));
        assert_eq!(session.back(), Err(SessionError::NoQuestions));
        assert_eq!(session.retry(), Err(SessionError::NoQuestions));
        assert!(session.submit().is_err());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn loading_empty_quiz_keeps_previous_state() {
        let mut session = loaded(2);
        assert_eq!(session.load(quiz(0)), Err(SessionError::NoQuestions));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn cannot_advance_without_selection() {
        let mut session = loaded(3);
        assert!(!session.can_advance());
        assert_eq!(session.next(), Err(SessionError::NoSelection { question: 1 }));
        assert_eq!(session.current_index(), 0);

        session.select(pick(2)).unwrap();
        assert!(session.can_advance());
        assert_eq!(session.next(), Ok(1));
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut session = loaded(3);
        assert_eq!(session.back(), Ok(0));

        answer_all(&mut session, pick(0));
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.next(), Ok(2));

        for _ in 0..5 {
            session.back().unwrap();
        }
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn invalid_choice_is_rejected() {
        let mut q = quiz(1);
        q.questions[0].options.truncate(2);
        let mut session = QuizSession::new();
        session.load(q).unwrap();

        assert_eq!(
            session.select(pick(3)),
            Err(SessionError::InvalidChoice {
                choice: pick(3),
                available: 2
            })
        );
        assert!(session.current_selection().is_none());
    }

    #[test]
    fn submit_only_on_last_with_selection() {
        let mut session = loaded(2);
        session.select(pick(1)).unwrap();
        assert!(!session.can_submit());
        assert_eq!(
            session.submit().unwrap_err(),
            SessionError::NotOnLastQuestion {
                current: 1,
                total: 2
            }
        );

        session.next().unwrap();
        assert_eq!(
            session.submit().unwrap_err(),
            SessionError::NoSelection { question: 2 }
        );

        session.select(pick(0)).unwrap();
        assert!(session.can_submit());
        let attempt = session.submit().unwrap();
        assert_eq!(attempt.score.correct, 1);
        assert_eq!(attempt.score.total, 2);
        assert!(session.is_submitted());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn submitted_session_is_frozen() {
        let mut session = loaded(1);
        session.select(pick(1)).unwrap();
        session.submit().unwrap();

        assert_eq!(session.select(pick(0)), Err(SessionError::AlreadySubmitted));
        assert_eq!(session.next(), Err(SessionError::AlreadySubmitted));
        assert!(matches!(session.submit(), Err(SessionError::AlreadySubmitted)));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn last_attempt_requires_submission() {
        let mut session = loaded(1);
        assert!(matches!(session.last_attempt(), Err(SessionError::NotSubmitted)));
        session.select(pick(1)).unwrap();
        session.submit().unwrap();
        assert!(session.last_attempt().unwrap().score.is_perfect());
    }

    #[test]
    fn retry_clears_selections() {
        let mut session = loaded(3);
        answer_all(&mut session, pick(1));
        session.submit().unwrap();

        session.retry().unwrap();
        assert!(!session.is_submitted());
        assert_eq!(session.current_index(), 0);
        assert!(session.selections().iter().all(Option::is_none));
        assert_eq!(session.selections().len(), 3);

        answer_all(&mut session, pick(0));
        let attempt = session.submit().unwrap();
        assert_eq!(attempt.score.correct, 0);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn reshuffle_preserves_questions() {
        let mut session = loaded(8);
        let mut before: Vec<String> = session.questions().iter().map(|q| q.text.clone()).collect();

        session.select(pick(0)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        session.reshuffle(&mut rng).unwrap();

        let mut after: Vec<String> = session.questions().iter().map(|q| q.text.clone()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert!(session.selections().iter().all(Option::is_none));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn reload_keeps_history() {
        let mut session = loaded(1);
        session.select(pick(1)).unwrap();
        session.submit().unwrap();

        session.load(quiz(4)).unwrap();
        assert_eq!(session.len(), 4);
        assert!(!session.is_submitted());
        assert_eq!(session.selections().len(), 4);
        assert_eq!(session.history().len(), 1);
    }
}
