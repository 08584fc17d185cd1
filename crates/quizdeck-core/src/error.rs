//! Session error types.
//!
//! These errors represent transitions the quiz state machine refuses.
//! They are typed so front ends can turn them into prompts without
//! string matching.

use thiserror::Error;

use crate::model::Choice;

/// Errors returned by [`QuizSession`](crate::session::QuizSession) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No quiz is loaded, or the loaded quiz has no questions.
    #[error("no questions loaded")]
    NoQuestions,

    /// The attempt has already been submitted.
    #[error("quiz already submitted; retry or reshuffle to start again")]
    AlreadySubmitted,

    /// The operation needs a submitted attempt.
    #[error("quiz has not been submitted yet")]
    NotSubmitted,

    /// The current question has no selected answer.
    #[error("select an answer for question {question} first")]
    NoSelection { question: usize },

    /// Submission is only offered on the last question.
    #[error("submit is only available on the last question ({current} of {total})")]
    NotOnLastQuestion { current: usize, total: usize },

    /// The choice is not one of the question's options.
    #[error("option {choice} does not exist for this question ({available} option(s))")]
    InvalidChoice { choice: Choice, available: usize },
}

impl SessionError {
    /// Returns `true` if this error is a disabled-control guard (the user
    /// just needs to do something else first) rather than a missing quiz.
    pub fn is_guard(&self) -> bool {
        !matches!(self, SessionError::NoQuestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_one_based() {
        let err = SessionError::NoSelection { question: 3 };
        assert_eq!(err.to_string(), "select an answer for question 3 first");

        let err = SessionError::NotOnLastQuestion {
            current: 2,
            total: 5,
        };
        assert!(err.to_string().contains("2 of 5"));
    }

    #[test]
    fn guard_classification() {
        assert!(!SessionError::NoQuestions.is_guard());
        assert!(SessionError::AlreadySubmitted.is_guard());
        assert!(SessionError::InvalidChoice {
            choice: Choice::from_index(3).unwrap(),
            available: 2,
        }
        .is_guard());
    }
}
