//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::ConfigError;

/// Where log output ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    File(&'a Path),
    Stderr,
    /// No subscriber at all, whatever `RUST_LOG` says.
    Disabled,
}

/// A configured file always wins. Without one, stderr is used only when the
/// caller owns a plain terminal; a full-screen UI gets no logging.
pub fn sink(config: &LoggingConfig, stderr_allowed: bool) -> LogSink<'_> {
    match &config.file {
        Some(path) => LogSink::File(path.as_path()),
        None if stderr_allowed => LogSink::Stderr,
        None => LogSink::Disabled,
    }
}

/// Build the filter: `RUST_LOG` wins over the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => config.level.parse::<EnvFilter>().map_err(|e| {
            ConfigError::Validation(format!("logging.level '{}': {e}", config.level))
        }),
    }
}

/// Install the global subscriber for the sink chosen by [`sink`]. Files are
/// appended to. Calling this twice leaves the first subscriber in place.
pub fn init(config: &LoggingConfig, stderr_allowed: bool) -> Result<(), ConfigError> {
    let target = sink(config, stderr_allowed);
    if target == LogSink::Disabled {
        return Ok(());
    }

    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match target {
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ConfigError::LogFile {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::Disabled => return Ok(()),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
