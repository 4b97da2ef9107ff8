//! CLI Exit Code Registry
//!
//! Single source of truth for the exit codes `csvjoin` returns.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 2    | Usage error (fewer than two files, bad option)   |
//! | 3    | I/O error (cannot open/read input, write output) |
//! | 4    | Format error (no header row, malformed CSV row)  |
//! | 5    | Schema error (no column common to every file)    |
//! | 6    | Config error (bad config file or option value)   |
//!
//! Code 1 is unassigned; no failure maps to it.

use csvjoin_engine::JoinError;

/// Success - join completed and output flushed.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments. Clap exits with this same code on its own
/// parse failures.
pub const EXIT_USAGE: u8 = 2;

/// Input could not be opened or read, or output could not be written.
pub const EXIT_IO: u8 = 3;

/// Missing header row or malformed CSV row.
pub const EXIT_FORMAT: u8 = 4;

/// No column name shared by every input.
pub const EXIT_SCHEMA: u8 = 5;

/// Invalid config file or option value.
pub const EXIT_CONFIG: u8 = 6;

/// Map an engine error to its exit code.
pub fn join_exit_code(err: &JoinError) -> u8 {
    match err {
        JoinError::Config(_) => EXIT_CONFIG,
        JoinError::Io { .. } | JoinError::Write(_) => EXIT_IO,
        JoinError::NoHeader { .. } | JoinError::Parse { .. } => EXIT_FORMAT,
        JoinError::NoJoinColumns => EXIT_SCHEMA,
    }
}
