//! Structured logging for the denoise pipeline
//!
//! Console output through `tracing-subscriber` plus an optional daily rolling
//! JSON file, with a span per run carrying a run id.

pub mod config;
pub mod spans;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use config::LoggingConfig;
pub use spans::RunSpan;

/// Initialize the logging system with the provided configuration.
///
/// `RUST_LOG` takes precedence over the configured levels. The returned guard
/// flushes the file writer and must be held until the program exits.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    let mut layers = Vec::new();
    let mut guard = None;

    // Console output layer
    if config.console_output {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(config.include_file_location)
            .with_file(config.include_file_location);
        layers.push(console_layer.boxed());
    }

    // File output layer
    if let Some(ref log_dir) = config.log_directory {
        let file_appender = tracing_appender::rolling::daily(log_dir, "denoise.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json();
        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::debug!("Logging system initialized with config: {:?}", config);
    Ok(guard)
}
