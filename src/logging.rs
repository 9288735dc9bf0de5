//! Tracing setup. The terminal is owned by the UI, so log lines go to a daily
//! rolling file instead of stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::Cli;

/// Environment variable that takes priority over the `-v`/`-q` flags.
const LOG_ENV: &str = "SONG_SHELF_LOG";

/// Keeps the background log writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _appender: Option<WorkerGuard>,
}

/// Install the global subscriber. Failing to set up the log file is not
/// fatal: the app runs without file logging after a warning on stderr.
pub fn init(cli: &Cli) -> LogGuard {
    let mut guard = None;

    let file_layer = match open_appender(cli) {
        Ok(appender) => {
            let (writer, worker) = tracing_appender::non_blocking(appender);
            guard = Some(worker);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
        }
        Err(err) => {
            eprintln!("WARNING: file logging disabled: {err:#}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter(cli))
        .with(file_layer)
        .init();

    LogGuard { _appender: guard }
}

fn open_appender(cli: &Cli) -> Result<RollingFileAppender> {
    let dir = log_dir(cli)?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("song-shelf")
        .filename_suffix("log")
        .max_log_files(3)
        .build(&dir)
        .context("failed to create rolling log file")
}

fn log_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.log_dir {
        return Ok(dir.clone());
    }
    let dirs = ProjectDirs::from("", "", "song-shelf")
        .ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(dirs.data_local_dir().join("logs"))
}

fn filter(cli: &Cli) -> EnvFilter {
    if std::env::var_os(LOG_ENV).is_some() {
        match EnvFilter::try_from_env(LOG_ENV) {
            Ok(filter) => return filter,
            Err(err) => eprintln!("WARNING: ignoring malformed {LOG_ENV}: {err}"),
        }
    }
    EnvFilter::new(cli.verbose.tracing_level_filter().to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tracing::level_filters::LevelFilter;

    use super::*;

    #[test]
    fn explicit_log_dir_wins() {
        let cli = Cli::parse_from(["song-shelf", "--log-dir", "/tmp/shelf-logs"]);
        assert_eq!(log_dir(&cli).unwrap(), PathBuf::from("/tmp/shelf-logs"));
    }

    #[test]
    fn verbosity_flags_pick_the_level() {
        let cli = Cli::parse_from(["song-shelf", "-v"]);
        assert_eq!(cli.verbose.tracing_level_filter(), LevelFilter::DEBUG);
        let cli = Cli::parse_from(["song-shelf", "-q"]);
        assert_eq!(cli.verbose.tracing_level_filter(), LevelFilter::WARN);
    }
}
