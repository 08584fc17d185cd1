//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdeck.toml
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    // Create example question file
    let example_path = std::path::Path::new("example-quiz.csv");
    if example_path.exists() {
        println!("example-quiz.csv already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created example-quiz.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit example-quiz.csv or add your own question file");
    println!("  2. Run: quizdeck validate --file example-quiz.csv");
    println!("  3. Run: quizdeck take --file example-quiz.csv");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

# Drop rows whose question cell is blank.
skip_blank_questions = true

# How the `answer` column is read: "auto", "letter" (A-D) or "text" (option text).
answer_key = "auto"

# Shuffle questions when a quiz is loaded.
shuffle_on_start = false

# Fixed seed for reproducible shuffles.
# seed = 42
"#;

const EXAMPLE_QUIZ: &str = "\
question,optionA,optionB,optionC,optionD,answer
What is the capital of France?,Berlin,Madrid,Paris,Rome,C
Which planet is known as the Red Planet?,Venus,Mars,Jupiter,Saturn,B
How many continents are there?,5,6,7,8,C
What is the chemical symbol for water?,H2O,CO2,NaCl,O2,A
Who wrote Romeo and Juliet?,Charles Dickens,William Shakespeare,Jane Austen,Mark Twain,William Shakespeare
";

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck_core::parser::{parse_quiz_str, validate_quiz, ParseOptions};

    #[test]
    fn example_quiz_is_valid() {
        let quiz = parse_quiz_str(EXAMPLE_QUIZ, "example-quiz.csv".as_ref(), ParseOptions::default())
            .unwrap();
        assert_eq!(quiz.len(), 5);
        assert!(validate_quiz(&quiz).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config = quizdeck_core::config::parse_config_str(SAMPLE_CONFIG).unwrap();
        assert!(config.skip_blank_questions);
        assert!(config.seed.is_none());
    }
}
