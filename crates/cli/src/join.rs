//! `csvjoin` command: resolve config, open inputs, run the engine.

use std::fs::{File, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csvjoin_engine::{JoinConfig, JoinSummary, SourceInput};
use tempfile::NamedTempFile;

use crate::{Cli, CliError};

pub fn cmd_join(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(cli.config.as_deref(), cli.delimiter, cli.key_separator)?;

    if let Some(ref out) = cli.output {
        if cli.files.iter().any(|f| same_file(f, out)) {
            return Err(CliError::args(format!(
                "output file {} is also an input",
                out.display()
            )));
        }
    }

    let sources = open_sources(&cli.files)?;

    let summary = match cli.output {
        Some(ref path) => {
            let mut staged = stage_output(path)?;
            let summary = run_into(&config, sources, staged.as_file_mut())?;
            // Dropping `staged` on an earlier return discards it; the target
            // is only replaced once the join has succeeded.
            staged.persist(path).map_err(|e| {
                CliError::io(format!("cannot write {}: {}", path.display(), e.error))
            })?;
            summary
        }
        None => run_into(&config, sources, io::stdout().lock())?,
    };

    if !cli.quiet {
        eprintln!(
            "joined {} file(s) on [{}]: {} key(s), {} row(s)",
            summary.sources,
            summary.join_columns.join(", "),
            summary.keys,
            summary.rows_written,
        );
    }

    Ok(())
}

fn run_into<W: Write>(
    config: &JoinConfig,
    sources: Vec<SourceInput<File>>,
    sink: W,
) -> Result<JoinSummary, CliError> {
    let mut writer = config.writer(sink).map_err(CliError::join)?;
    csvjoin_engine::run(config, sources, &mut writer).map_err(CliError::join)
}

/// Temp file next to `path`, so the final rename stays on one filesystem.
/// It takes the permissions of the file it will replace, if there is one.
fn stage_output(path: &Path) -> Result<NamedTempFile, CliError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(".csvjoin-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", path.display())))?;

    if let Some(perms) = output_permissions(path) {
        staged
            .as_file()
            .set_permissions(perms)
            .map_err(|e| CliError::io(format!("cannot create {}: {e}", path.display())))?;
    }

    Ok(staged)
}

fn output_permissions(path: &Path) -> Option<Permissions> {
    std::fs::metadata(path)
        .ok()
        .map(|meta| meta.permissions())
        .or_else(new_file_permissions)
}

/// Temp files are created owner-only; a fresh output file should not be.
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Defaults, then the config file, then flags and environment.
fn resolve_config(
    path: Option<&Path>,
    delimiter: Option<char>,
    key_separator: Option<String>,
) -> Result<JoinConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::config(format!("cannot read config {}: {e}", path.display()))
            })?;
            JoinConfig::from_toml(&text)
                .map_err(CliError::join)
                .map_err(|e| e.with_hint(format!("in {}", path.display())))?
        }
        None => JoinConfig::default(),
    };

    if let Some(d) = delimiter {
        config.delimiter = d;
    }
    if let Some(sep) = key_separator {
        config.key_separator = sep;
    }

    config.validate().map_err(CliError::join)?;
    log::debug!("config: {config:?}");
    Ok(config)
}

/// Open every input before any is read, so a missing file fails fast.
fn open_sources(files: &[PathBuf]) -> Result<Vec<SourceInput<File>>, CliError> {
    files
        .iter()
        .map(|path| {
            let file = File::open(path).map_err(|e| {
                CliError::io(format!("cannot read CSV file {}: {e}", path.display()))
            })?;
            Ok(SourceInput::new(path.display().to_string(), file))
        })
        .collect()
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
