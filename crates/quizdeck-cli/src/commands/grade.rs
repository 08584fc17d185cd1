//! The `quizdeck grade` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;

use quizdeck_core::history::Attempt;
use quizdeck_core::report::AttemptReview;
use quizdeck_core::scoring::parse_answer_sheet;

/// Output formats for a graded review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    #[value(alias = "md")]
    Markdown,
}

pub fn execute(
    file: PathBuf,
    answers: String,
    format: ReportFormat,
    pass_mark: Option<f64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if let Some(mark) = pass_mark {
        anyhow::ensure!(
            (0.0..=100.0).contains(&mark),
            "pass mark must be between 0 and 100"
        );
    }

    let (_, quiz) = super::load_quiz(&file, config_path)?;
    anyhow::ensure!(!quiz.is_empty(), "{}: no questions found", file.display());

    let sheet = parse_answer_sheet(&answers).map_err(|e| anyhow::anyhow!(e))?;
    anyhow::ensure!(
        sheet.len() <= quiz.len(),
        "{} answers given but the quiz has {} questions",
        sheet.len(),
        quiz.len()
    );

    let attempt = Attempt::record(&quiz.name, quiz.questions, sheet);
    let review = AttemptReview::from_attempt(1, &attempt);

    match format {
        ReportFormat::Markdown => println!("{}", review.to_markdown()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&review)?),
        ReportFormat::Text => print!("{}", review.to_text()),
    }

    if let Some(mark) = pass_mark {
        if attempt.score.percent() < mark {
            eprintln!(
                "Score {:.1}% is below the pass mark of {mark:.1}%",
                attempt.score.percent()
            );
            std::process::exit(1);
        }
    }

    Ok(())
}
