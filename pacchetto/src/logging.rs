//! Logging setup.
//!
//! Logs go to stderr and to `<log_dir>/pacchetto.log` (truncated on each
//! run). `RUST_LOG` overrides the default filter.

use std::fs;
use std::path::Path;

use time::format_description::well_known::Rfc3339;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{PacchettoError, Result};

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "pacchetto.log";

/// Default filter directive.
///
/// The library and the `pacchetto` binary share one target prefix.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "pacchetto=debug"
    } else {
        "pacchetto=info"
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the file
/// writer.
pub fn init_logging(log_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir).map_err(|e| PacchettoError::io(log_dir, e))?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = fs::File::create(&log_path).map_err(|e| PacchettoError::io(&log_path, e))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // Local offset lookup can fail on multi-threaded Unix processes.
    let timer = OffsetTime::local_rfc_3339()
        .unwrap_or_else(|_| OffsetTime::new(time::UtcOffset::UTC, Rfc3339));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_timer(timer.clone())
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| PacchettoError::Config(format!("failed to initialise logging: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(false), "pacchetto=info");
        assert_eq!(default_filter(true), "pacchetto=debug");
    }
}
