//! The `quizdeck take` command: an interactive quiz on stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quizdeck_core::error::SessionError;
use quizdeck_core::model::Choice;
use quizdeck_core::parser::{self, ParseOptions};
use quizdeck_core::report::AttemptReview;
use quizdeck_core::session::QuizSession;

const HELP: &str = "\
Commands:
  a, b, c, d      select an option (1-4 also work)
  n, next         go to the next question
  p, prev, back   go to the previous question
  s, submit       submit the quiz (last question only)
  r, retry        start over in the same order
  x, reshuffle    start over in a new random order
  l, load <file>  load another question file
  h, history      list previous attempts
  v, review [n]   show the answers of attempt n (default: latest)
  ?, help         show this help
  q, quit         leave";

pub fn execute(
    file: PathBuf,
    shuffle: bool,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, quiz) = super::load_quiz(&file, config_path)?;

    let rng = match seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut shell = Shell::new(rng, config.parse_options(), shuffle || config.shuffle_on_start);
    shell
        .start(quiz)
        .with_context(|| format!("cannot start quiz from {}", file.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout.lock())
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Select(Choice),
    Next,
    Back,
    Submit,
    Retry,
    Reshuffle,
    Load(Option<PathBuf>),
    History,
    Review(Option<usize>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "" => Command::Empty,
            "n" | "next" => Command::Next,
            "p" | "prev" | "back" => Command::Back,
            "s" | "submit" => Command::Submit,
            "r" | "retry" => Command::Retry,
            "x" | "reshuffle" | "shuffle" => Command::Reshuffle,
            "h" | "history" => Command::History,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            "l" | "load" => Command::Load((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "v" | "review" => match rest {
                "" => Command::Review(None),
                n => n
                    .parse()
                    .map(|n| Command::Review(Some(n)))
                    .unwrap_or_else(|_| Command::Unknown(line.to_string())),
            },
            "1" | "2" | "3" | "4" => head
                .parse::<usize>()
                .ok()
                .and_then(|n| Choice::from_index(n - 1))
                .map(Command::Select)
                .unwrap_or_else(|| Command::Unknown(line.to_string())),
            other if rest.is_empty() => other
                .parse::<Choice>()
                .map(Command::Select)
                .unwrap_or_else(|_| Command::Unknown(line.to_string())),
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Drives a [`QuizSession`] from line-oriented input.
struct Shell<G> {
    session: QuizSession,
    rng: G,
    parse_options: ParseOptions,
    shuffle_on_load: bool,
}

impl<G: Rng> Shell<G> {
    fn new(rng: G, parse_options: ParseOptions, shuffle_on_load: bool) -> Self {
        Self {
            session: QuizSession::new(),
            rng,
            parse_options,
            shuffle_on_load,
        }
    }

    fn start(&mut self, quiz: quizdeck_core::model::Quiz) -> Result<(), SessionError> {
        self.session.load(quiz)?;
        if self.shuffle_on_load {
            self.session.reshuffle(&mut self.rng)?;
        }
        Ok(())
    }

    fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.render(out)?;
        prompt(out)?;

        for line in input.lines() {
            let line = line.context("failed to read input")?;
            let command = Command::parse(&line);
            tracing::debug!("command: {command:?}");

            if command == Command::Quit {
                break;
            }
            self.handle(command, out)?;
            prompt(out)?;
        }

        writeln!(out, "\nGoodbye.")?;
        Ok(())
    }

    fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        let outcome = match command {
            Command::Select(choice) => self.session.select(choice).map(|_| true),
            Command::Next => self.session.next().map(|_| true),
            Command::Back => self.session.back().map(|_| true),
            Command::Retry => self.session.retry().map(|_| true),
            Command::Reshuffle => self.session.reshuffle(&mut self.rng).map(|_| true),
            Command::Submit => match self.session.submit() {
                Ok(attempt) => {
                    writeln!(
                        out,
                        "\nSubmitted! Score: {} ({:.0}%)",
                        attempt.score,
                        attempt.score.percent()
                    )?;
                    Ok(true)
                }
                Err(e) => Err(e),
            },
            Command::Load(path) => {
                self.load(path.as_deref(), out)?;
                Ok(false)
            }
            Command::History => {
                self.print_history(out)?;
                Ok(false)
            }
            Command::Review(number) => {
                self.print_review(number, out)?;
                Ok(false)
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                Ok(false)
            }
            Command::Empty => Ok(true),
            Command::Unknown(text) => {
                writeln!(out, "Unknown command `{text}`. Type ? for help.")?;
                Ok(false)
            }
            Command::Quit => Ok(false),
        };

        match outcome {
            Ok(true) => self.render(out),
            Ok(false) => Ok(()),
            Err(e) => {
                writeln!(out, "! {e}")?;
                Ok(())
            }
        }
    }

    fn load<W: Write>(&mut self, path: Option<&Path>, out: &mut W) -> Result<()> {
        let Some(path) = path else {
            writeln!(out, "No file given; nothing loaded.")?;
            return Ok(());
        };

        let quiz = match parser::parse_quiz(path, self.parse_options) {
            Ok(quiz) => quiz,
            Err(e) => {
                writeln!(out, "! {e:#}")?;
                return Ok(());
            }
        };

        match self.start(quiz) {
            Ok(()) => {
                writeln!(
                    out,
                    "Loaded {} ({} questions).",
                    self.session.quiz_name(),
                    self.session.len()
                )?;
                self.render(out)
            }
            Err(e) => {
                writeln!(out, "! {}: {e}", path.display())?;
                Ok(())
            }
        }
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.session.is_submitted() {
            if let Ok(attempt) = self.session.last_attempt() {
                let review = AttemptReview::from_attempt(self.session.history().len(), attempt);
                writeln!(out, "\n{}", review.to_text())?;
            }
            writeln!(
                out,
                "[r]etry  [x] reshuffle  [h]istory  [l]oad <file>  [q]uit"
            )?;
            return Ok(());
        }

        let Some(question) = self.session.current_question() else {
            return Ok(());
        };
        let index = self.session.current_index();
        let selected = self.session.current_selection();

        writeln!(out, "\nQuestion {} of {}", index + 1, self.session.len())?;
        writeln!(out, "{}. {}", index + 1, question.text)?;
        for (choice, text) in question.labelled_options() {
            let mark = if selected == Some(choice) { "*" } else { " " };
            writeln!(out, "  ({mark}) {choice}. {text}")?;
        }

        let forward = if self.session.is_last() {
            "[s]ubmit"
        } else {
            "[n]ext"
        };
        writeln!(out, "[a-d] select  {forward}  [p]rev  [?] help")?;
        Ok(())
    }

    fn print_history<W: Write>(&self, out: &mut W) -> Result<()> {
        use comfy_table::{Cell, Table};

        let history = self.session.history();
        if history.is_empty() {
            writeln!(out, "No attempts yet.")?;
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec!["#", "Quiz", "Score", "Percent", "Submitted"]);
        for (i, attempt) in history.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&attempt.quiz),
                Cell::new(attempt.score),
                Cell::new(format!("{:.1}%", attempt.score.percent())),
                Cell::new(attempt.submitted_at.format("%Y-%m-%d %H:%M:%S")),
            ]);
        }
        writeln!(out, "{table}")?;

        if let Some(stats) = history.stats() {
            write!(
                out,
                "Attempts: {}  best {:.1}%  worst {:.1}%  mean {:.1}%",
                stats.attempts, stats.best_percent, stats.worst_percent, stats.mean_percent
            )?;
            if let Some(delta) = stats.last_delta {
                write!(out, "  last change {delta:+.1}%")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn print_review<W: Write>(&self, number: Option<usize>, out: &mut W) -> Result<()> {
        let history = self.session.history();
        let number = number.unwrap_or(history.len());

        match number.checked_sub(1).and_then(|i| history.get(i)) {
            Some(attempt) => {
                write!(out, "{}", AttemptReview::from_attempt(number, attempt).to_text())?;
            }
            None => writeln!(out, "No attempt #{number}.")?,
        }
        Ok(())
    }
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
