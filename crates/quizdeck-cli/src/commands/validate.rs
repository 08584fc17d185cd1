//! The `quizdeck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_core::parser::validate_quiz;

pub fn execute(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (config, quiz) = super::load_quiz(&file, config_path)?;

    println!(
        "Quiz: {} ({} questions, answer key: {})",
        quiz.name,
        quiz.len(),
        config.answer_key
    );
    if quiz.skipped_rows > 0 {
        println!("  {} blank row(s) skipped", quiz.skipped_rows);
    }

    let warnings = validate_quiz(&quiz);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [Q{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Quiz is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
