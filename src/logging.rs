//! Structured logging setup for the server binary.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Name prefix of the rolling log files
const LOG_FILE_PREFIX: &str = "storeboard.log";

/// How the process should log
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    /// Log at debug level unless `RUST_LOG` says otherwise
    pub debug: bool,
    /// Write JSON lines to stdout instead of the human format
    pub json: bool,
    /// Also write JSON lines to a daily rolling file in this directory
    pub log_dir: Option<String>,
}

impl LogSettings {
    /// The filter used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

/// Installs the global subscriber
///
/// Returns the guard of the file writer when file logging is enabled; it must
/// be held until shutdown so buffered lines are flushed.
pub fn init_logging(settings: &LogSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.default_directive()));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if settings.json {
        layers.push(fmt::layer().json().boxed());
    } else {
        layers.push(fmt::layer().with_target(true).with_line_number(false).boxed());
    }

    let guard = settings.log_dir.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt::layer().json().with_ansi(false).with_writer(writer).boxed());
        guard
    });

    tracing_subscriber::registry().with(layers).with(filter).init();

    tracing::info!(
        level = settings.default_directive(),
        json = settings.json,
        log_dir = ?settings.log_dir,
        "Logging initialized"
    );
    guard
}
