//! Core data model types for quizdeck.
//!
//! These are the fundamental types that the rest of the system uses to
//! represent questions, option choices, and loaded quizzes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest number of options a question can carry (`A` through `D`).
pub const MAX_OPTIONS: usize = 4;

/// An option position within a question, displayed as a letter (`A` = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Choice(u8);

impl Choice {
    /// Build a choice from a zero-based option index.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < MAX_OPTIONS).then(|| Choice(index as u8))
    }

    /// Zero-based option index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The letter label for this choice.
    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                Choice::from_index(index).ok_or_else(|| format!("unknown option: {trimmed}"))
            }
            _ => Err(format!("unknown option: {trimmed}")),
        }
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        choice.to_string()
    }
}

impl TryFrom<String> for Choice {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How the `answer` column of a question file is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKeyMode {
    /// Accept a letter code, falling back to matching the option text.
    #[default]
    Auto,
    /// Only a letter code (`A`..`D`) is accepted.
    Letter,
    /// Only the literal option text is accepted.
    Text,
}

impl fmt::Display for AnswerKeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerKeyMode::Auto => write!(f, "auto"),
            AnswerKeyMode::Letter => write!(f, "letter"),
            AnswerKeyMode::Text => write!(f, "text"),
        }
    }
}

impl FromStr for AnswerKeyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(AnswerKeyMode::Auto),
            "letter" | "letters" => Ok(AnswerKeyMode::Letter),
            "text" | "option" => Ok(AnswerKeyMode::Text),
            other => Err(format!("unknown answer key mode: {other}")),
        }
    }
}

impl AnswerKeyMode {
    /// Resolve a raw answer marker against a question's options.
    pub fn resolve(self, raw: &str, options: &[String]) -> Option<Choice> {
        let marker = raw.trim();
        if marker.is_empty() {
            return None;
        }

        let by_letter = || {
            marker
                .parse::<Choice>()
                .ok()
                .filter(|c| c.index() < options.len())
        };
        let by_text = || {
            let wanted = marker.to_lowercase();
            options
                .iter()
                .position(|opt| !opt.trim().is_empty() && opt.trim().to_lowercase() == wanted)
                .and_then(Choice::from_index)
        };

        match self {
            AnswerKeyMode::Letter => by_letter(),
            AnswerKeyMode::Text => by_text(),
            AnswerKeyMode::Auto => by_letter().or_else(by_text),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question prompt.
    pub text: String,
    /// Option texts in display order; `options[0]` is option `A`.
    pub options: Vec<String>,
    /// The answer marker exactly as written in the source file.
    pub raw_answer: String,
    /// The option the marker resolved to, if any.
    #[serde(default)]
    pub answer: Option<Choice>,
}

impl Question {
    /// Returns `true` if `choice` names one of this question's options.
    pub fn has_option(&self, choice: Choice) -> bool {
        choice.index() < self.options.len()
    }

    /// Text of the option behind `choice`.
    pub fn option_text(&self, choice: Choice) -> Option<&str> {
        self.options.get(choice.index()).map(String::as_str)
    }

    /// Returns `true` if `choice` is the correct answer.
    pub fn is_correct(&self, choice: Option<Choice>) -> bool {
        matches!((self.answer, choice), (Some(a), Some(c)) if a == c)
    }

    /// Iterate options together with their letter labels.
    pub fn labelled_options(&self) -> impl Iterator<Item = (Choice, &str)> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(i, opt)| Choice::from_index(i).map(|c| (c, opt.as_str())))
    }
}

/// A loaded question file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Human-readable name, taken from the file stem.
    pub name: String,
    /// Questions in file order.
    pub questions: Vec<Question>,
    /// Number of rows dropped during ingestion.
    #[serde(default)]
    pub skipped_rows: usize,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
