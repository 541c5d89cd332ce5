//! Logging Initialization
//!
//! Sets up `tracing` with:
//! - a JSON file layer (daily rolling) in the data directory
//! - a pretty stderr layer, so stdout stays free for export text
//! - bridging of `log` crate macros into `tracing`

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "science-guide.log";

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize logging with both file and stderr output.
///
/// Returns a `WorkerGuard` when file logging is enabled; it must be kept
/// alive so buffered lines are flushed on shutdown.
pub fn init(config: &LoggingConfig, log_dir: &Path) -> Option<WorkerGuard> {
    let (file_layer, guard) = match file_writer(config, log_dir) {
        Some((writer, guard)) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(true)
                .with_filter(env_filter(config));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .pretty()
        .with_filter(env_filter(config));

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer);
    install(subscriber);

    tracing::debug!(log_dir = %log_dir.display(), "Logging initialized");
    guard
}

/// Initialize logging to the log file only.
///
/// Used when stderr must stay clean (e.g. `--print-prompt` piping).
pub fn init_quiet(config: &LoggingConfig, log_dir: &Path) -> Option<WorkerGuard> {
    let (writer, guard) = file_writer(config, log_dir)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter(config));

    install(tracing_subscriber::registry().with(file_layer));
    Some(guard)
}

fn file_writer(
    config: &LoggingConfig,
    log_dir: &Path,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !config.file_logging {
        return None;
    }
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory {}: {}", log_dir.display(), e);
            return None;
        }
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    Some(tracing_appender::non_blocking(file_appender))
}

fn install<S>(subscriber: S)
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
        return;
    }
    // Redirect standard `log` macros to `tracing`
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }
}
