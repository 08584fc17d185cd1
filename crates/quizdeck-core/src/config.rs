//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::AnswerKeyMode;
use crate::parser::ParseOptions;

/// Top-level quizdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Drop rows whose question text is blank.
    #[serde(default = "default_true")]
    pub skip_blank_questions: bool,
    /// How the `answer` column is interpreted.
    #[serde(default)]
    pub answer_key: AnswerKeyMode,
    /// Shuffle questions when a quiz is first loaded.
    #[serde(default)]
    pub shuffle_on_start: bool,
    /// Fixed RNG seed for reproducible shuffles.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl Default for QuizdeckConfig {
    fn default() -> Self {
        Self {
            skip_blank_questions: true,
            answer_key: AnswerKeyMode::Auto,
            shuffle_on_start: false,
            seed: None,
        }
    }
}

impl QuizdeckConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            answer_key: self.answer_key,
            skip_blank_questions: self.skip_blank_questions,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim; references inside them are
/// not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// Environment variable overrides: `QUIZDECK_SEED`, `QUIZDECK_ANSWER_KEY`.
pub fn load_config() -> Result<QuizdeckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizdeckConfig::default(),
    };

    if let Ok(seed) = std::env::var("QUIZDECK_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("QUIZDECK_SEED is not a number: {seed}"))?,
        );
    }

    if let Ok(mode) = std::env::var("QUIZDECK_ANSWER_KEY") {
        config.answer_key = mode
            .parse()
            .map_err(|e: String| anyhow::anyhow!("QUIZDECK_ANSWER_KEY: {e}"))?;
    }

    Ok(config)
}

/// Parse config TOML, resolving `${VAR}` references first.
pub fn parse_config_str(content: &str) -> Result<QuizdeckConfig> {
    let resolved = resolve_env_vars(content);
    Ok(toml::from_str::<QuizdeckConfig>(&resolved)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}
