//! CSV question file parser.
//!
//! Loads quizzes from tabular files with a header row and the columns
//! `question`, `optionA`..`optionD` and `answer`, and validates them.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{AnswerKeyMode, Question, Quiz, MAX_OPTIONS};

/// Knobs that change how rows become questions.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// How the `answer` column is interpreted.
    pub answer_key: AnswerKeyMode,
    /// Drop rows whose question text is blank.
    pub skip_blank_questions: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            answer_key: AnswerKeyMode::Auto,
            skip_blank_questions: true,
        }
    }
}

/// The columns a question file may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Question,
    Option(usize),
    Answer,
}

impl Column {
    /// Map a header cell to a column, ignoring case and separators.
    fn from_header(header: &str) -> Option<Self> {
        let normalized: String = header
            .trim_start_matches('\u{feff}')
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "question" => Some(Column::Question),
            "answer" => Some(Column::Answer),
            "optiona" => Some(Column::Option(0)),
            "optionb" => Some(Column::Option(1)),
            "optionc" => Some(Column::Option(2)),
            "optiond" => Some(Column::Option(3)),
            _ => None,
        }
    }
}

/// Parse a CSV file into a `Quiz`.
pub fn parse_quiz(path: &Path, options: ParseOptions) -> Result<Quiz> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open question file: {}", path.display()))?;

    parse_quiz_reader(file, path, options)
}

/// Parse CSV text into a `Quiz` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path, options: ParseOptions) -> Result<Quiz> {
    parse_quiz_reader(content.as_bytes(), source_path, options)
}

/// Parse CSV from any reader. `source_path` names the quiz and appears in errors.
pub fn parse_quiz_reader<R: Read>(
    reader: R,
    source_path: &Path,
    options: ParseOptions,
) -> Result<Quiz> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .with_context(|| format!("failed to read CSV header: {}", source_path.display()))?
        .clone();

    let columns: HashMap<Column, usize> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| Column::from_header(h).map(|c| (c, i)))
        .collect();

    if !columns.contains_key(&Column::Question) {
        tracing::warn!(
            "{}: no `question` column in header, every row will be blank",
            source_path.display()
        );
    }

    let mut questions = Vec::new();
    let mut skipped_rows = 0;

    for record in csv_reader.records() {
        let record = record
            .with_context(|| format!("failed to parse CSV: {}", source_path.display()))?;

        let field = |column: Column| -> String {
            columns
                .get(&column)
                .and_then(|&i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };

        let text = field(Column::Question);
        if options.skip_blank_questions && text.trim().is_empty() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            tracing::warn!("{}:{line}: skipping row with blank question", source_path.display());
            skipped_rows += 1;
            continue;
        }

        let mut option_texts: Vec<String> =
            (0..MAX_OPTIONS).map(|i| field(Column::Option(i))).collect();
        while option_texts.last().is_some_and(|o| o.is_empty()) {
            option_texts.pop();
        }

        let raw_answer = field(Column::Answer);
        let answer = options.answer_key.resolve(&raw_answer, &option_texts);

        questions.push(Question {
            text,
            options: option_texts,
            raw_answer,
            answer,
        });
    }

    let name = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "quiz".to_string());

    tracing::info!(
        "loaded {} question(s) from {} ({} skipped)",
        questions.len(),
        source_path.display(),
        skipped_rows
    );

    Ok(Quiz {
        name,
        questions,
        skipped_rows,
    })
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// One-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz for common authoring mistakes.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "quiz has no questions".into(),
        });
    }

    let mut seen = HashSet::new();
    for (i, q) in quiz.questions.iter().enumerate() {
        let number = Some(i + 1);

        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "question text is blank".into(),
            });
        } else if !seen.insert(q.text.trim().to_lowercase()) {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("duplicate question: {}", q.text.trim()),
            });
        }

        if q.options.len() < 2 {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("only {} option(s) provided", q.options.len()),
            });
        }

        if q.answer.is_none() {
            let message = if q.raw_answer.trim().is_empty() {
                "answer is missing".to_string()
            } else {
                format!("answer `{}` does not match any option", q.raw_answer)
            };
            warnings.push(ValidationWarning {
                question: number,
                message,
            });
        }
    }

    warnings
}
