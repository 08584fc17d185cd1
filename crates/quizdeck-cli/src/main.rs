//! quizdeck CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizdeck",
    version,
    about = "Take multiple-choice quizzes from CSV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        /// Path to the question CSV file
        #[arg(long)]
        file: PathBuf,

        /// Shuffle questions before the first attempt
        #[arg(long)]
        shuffle: bool,

        /// RNG seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a complete answer sheet without prompting
    Grade {
        /// Path to the question CSV file
        #[arg(long)]
        file: PathBuf,

        /// Comma-separated answers in question order (e.g. "A,C,,B")
        #[arg(long)]
        answers: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = commands::grade::ReportFormat::Text)]
        format: commands::grade::ReportFormat,

        /// Exit code 1 if the score percentage is below this value
        #[arg(long)]
        pass_mark: Option<f64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question CSV file for problems
    Validate {
        /// Path to the question CSV file
        #[arg(long)]
        file: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and an example question file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizdeck=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            file,
            shuffle,
            seed,
            config,
        } => commands::take::execute(file, shuffle, seed, config),
        Commands::Grade {
            file,
            answers,
            format,
            pass_mark,
            config,
        } => commands::grade::execute(file, answers, format, pass_mark, config),
        Commands::Validate { file, config } => commands::validate::execute(file, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
