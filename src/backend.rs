use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::registry;

/// The `log` facade backend that routes records into capture sinks.
///
/// Every record is delivered to the sink registered under its target in
/// the calling thread's current scope, so `log::info!(target: "auth", ..)`
/// lands in `registry::sink("auth")`. The message arrives pre-formatted
/// by the facade; tags are not expressible through `log`, the diagnostic
/// context is snapshotted as usual.
pub struct CaptureBackend;

static BACKEND: CaptureBackend = CaptureBackend;

impl CaptureBackend {
    /// Connects the capture backend to the logging framework.
    ///
    /// # Errors
    ///
    /// Fails if another logger is already set.
    pub fn try_install() -> Result<(), SetLoggerError> {
        log::set_logger(&BACKEND).map(|()| log::set_max_level(LevelFilter::Trace))
    }

    /// Connects the capture backend, tolerating an already-set logger.
    ///
    /// The backend is stateless, so repeated installs across tests in one
    /// process are safe to ignore.
    pub fn install() {
        if Self::try_install().is_err() {
            // a logger is already installed, nothing to replace
        }
    }
}

impl Log for CaptureBackend {
    fn enabled(&self, metadata: &Metadata) -> bool {
        registry::sink(metadata.target()).is_enabled(metadata.level())
    }

    fn log(&self, record: &Record) {
        let sink = registry::sink(record.target());
        sink.record(record.level(), &record.args().to_string(), Vec::new());
    }

    fn flush(&self) {}
}
