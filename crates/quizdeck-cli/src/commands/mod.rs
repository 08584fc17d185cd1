pub mod grade;
pub mod init;
pub mod take;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use quizdeck_core::config::{load_config_from, QuizdeckConfig};
use quizdeck_core::model::Quiz;
use quizdeck_core::parser;

/// Load config, then the quiz at `file` with the configured parse options.
pub fn load_quiz(file: &Path, config_path: Option<PathBuf>) -> Result<(QuizdeckConfig, Quiz)> {
    let config = load_config_from(config_path.as_deref())?;
    let quiz = parser::parse_quiz(file, config.parse_options())?;
    Ok((config, quiz))
}
