//! # Logger
//!
//! Installs the process-wide `tracing` subscriber used by every GAP crate.
//! Output goes to a compact console layer, to rolling log files (plain text or
//! JSON lines) written through a non-blocking worker, or to both.
//!
//! `RUST_LOG` is honored unless [`LoggerBuilder::filter`] sets explicit
//! directives.
//!
//! ## Example
//!
//! ```rust
//! use gap_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("gap")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;

pub use crate::builder::{ConsoleOnly, LoggerBuilder, Named, Unnamed, WithFiles};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Handle to the installed subscriber.
///
/// Holds the file writer guard; pending lines are flushed when it is dropped,
/// so keep it alive until shutdown.
#[must_use = "dropping the handle stops the background log writer"]
#[derive(Debug)]
pub struct Logger {
    pub(crate) guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring the global subscriber.
    ///
    /// The name doubles as the log file prefix (`gap.2026-10-16.log`).
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Whether rolling log files are being written.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("flushing log files");
        }
    }
}
