// csvjoin - N-way relational join of CSV files on their shared columns

mod exit_codes;
mod join;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use exit_codes::{join_exit_code, EXIT_CONFIG, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "csvjoin")]
#[command(about = "Join CSV files on every column they have in common")]
#[command(version)]
#[command(after_help = "\
Each key found in any file produces one output row per combination of its
matching rows across files. Files without a match leave their columns blank.

Examples:
  csvjoin people.csv ages.csv
  csvjoin orders.csv reps.csv stock.csv -o joined.csv
  csvjoin -d ';' left.csv right.csv
  RUST_LOG=debug csvjoin a.csv b.csv")]
pub struct Cli {
    /// Input CSV files (at least two), each with a header row
    #[arg(required = true, num_args = 2.., value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Field delimiter for input and output [default: ,]
    #[arg(long, short = 'd', env = "CSVJOIN_DELIMITER")]
    pub delimiter: Option<char>,

    /// Separator placed between join-column values in a key [default: ++]
    #[arg(long, env = "CSVJOIN_KEY_SEPARATOR")]
    pub key_separator: Option<String>,

    /// TOML config file (delimiter, key_separator); flags override it
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Suppress the summary line on stderr
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match join::cmd_join(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    /// Create error from an engine error with its registered exit code.
    pub fn join(err: csvjoin_engine::JoinError) -> Self {
        let code = join_exit_code(&err);
        let hint = match &err {
            csvjoin_engine::JoinError::NoJoinColumns => {
                Some("every input file must share at least one column name".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
