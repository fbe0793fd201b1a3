//! Logging configuration using tracing with an optional file appender.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize tracing for a host embedding the engine.
///
/// Respects `RUST_LOG`, defaulting to `info` for this crate. When a log path
/// is given, returns a guard that must be held for the duration of the
/// program to ensure file logs are flushed; dropping the guard flushes the
/// remainder.
///
/// In debug builds, span enter/exit events are written to the file layer for
/// detailed tracing. In release builds, only explicit log events are recorded.
pub fn init_logging(log_path: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apcatune=info"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    match log_path {
        Some(path) => {
            let parent = path.parent().unwrap_or(Path::new("."));
            let filename = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("apcatune.log"));

            let file_appender = tracing_appender::rolling::never(parent, filename);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false);

            // Only add span events in debug builds (significant overhead in release)
            #[cfg(debug_assertions)]
            let file_layer = {
                use tracing_subscriber::fmt::format::FmtSpan;
                file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
            };

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();

            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();

            None
        }
    }
}
