use std::fmt;

#[derive(Debug)]
pub enum JoinError {
    /// Config file could not be parsed or holds an invalid value.
    Config(String),
    /// Source could not be opened or read.
    Io { source: String, message: String },
    /// Source has no header row.
    NoHeader { source: String },
    /// Malformed CSV row (bad quoting, wrong field count) or a column name
    /// that is not UTF-8.
    Parse {
        source: String,
        line: Option<u64>,
        message: String,
    },
    /// No column name appears in every source's header.
    NoJoinColumns,
    /// Writing the joined output failed.
    Write(String),
}

impl JoinError {
    pub(crate) fn from_csv(source: &str, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::Io {
                source: source.to_string(),
                message: e.to_string(),
            },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => Self::Parse {
                source: source.to_string(),
                line,
                message: format!("expected {expected_len} field(s), found {len}"),
            },
            csv::ErrorKind::Utf8 { err, .. } => Self::Parse {
                source: source.to_string(),
                line,
                message: format!(
                    "invalid UTF-8 in field {} near byte index {}",
                    err.field() + 1,
                    err.valid_up_to()
                ),
            },
            other => Self::Parse {
                source: source.to_string(),
                line,
                message: format!("{other:?}"),
            },
        }
    }

    pub(crate) fn from_write(err: impl fmt::Display) -> Self {
        Self::Write(err.to_string())
    }
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config error: {msg}"),
            Self::Io { source, message } => write!(f, "cannot read CSV file {source}: {message}"),
            Self::NoHeader { source } => {
                write!(f, "CSV file {source} has no headers, cannot process")
            }
            Self::Parse { source, line: Some(line), message } => {
                write!(f, "failed to parse CSV file {source} at line {line}: {message}")
            }
            Self::Parse { source, line: None, message } => {
                write!(f, "failed to parse CSV file {source}: {message}")
            }
            Self::NoJoinColumns => {
                write!(f, "cannot identify columns common to all input files to join")
            }
            Self::Write(msg) => write!(f, "failed to write CSV output: {msg}"),
        }
    }
}

impl std::error::Error for JoinError {}
