use std::env;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigPaths, LogFormat, LoggingConfig};

/// Environment variable that overrides the configured log format.
pub const LOG_FORMAT_ENV: &str = "PACONTROL_LOG_FORMAT";

/// Resolves the effective log format: the environment wins over the config.
pub fn effective_format(configured: LogFormat) -> LogFormat {
    env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(configured)
}

/// Initialize tracing according to the logging configuration.
///
/// Uses RUST_LOG if set, otherwise defaults to "info". When file output is
/// enabled the returned guard must be held for the lifetime of the program
/// so buffered lines are flushed on exit.
///
/// # Errors
/// Returns error if the log directory cannot be created or a global
/// subscriber is already installed
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let format = effective_format(config.format);
    if config.file {
        init_with_file(format).map(Some)
    } else {
        init_console(format).map(|()| None)
    }
}

/// Initialize console-only tracing.
///
/// # Errors
/// Returns error if tracing subscriber initialization fails
pub fn init_console(format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_thread_names(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize tracing with file output
///
/// Like [`init_console`] but also writes compact lines to a daily-rotated
/// file in the pacontrol logs directory.
///
/// # Errors
/// Returns error if file creation or tracing subscriber initialization fails
pub fn init_with_file(format: LogFormat) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    const DAYS_TO_KEEP: usize = 7;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = ConfigPaths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("pacontrol")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_thread_names(true)
                        .with_writer(std::io::stderr),
                )
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()?;
        }
    }

    Ok(guard)
}
