//! Structured access logging.
//!
//! The access log is an explicitly constructed [`AccessLogger`] handed to the
//! [`AccessLog`](crate::middleware::AccessLog) middleware at startup. It owns
//! a private `tracing` dispatcher with a JSON formatter, so the records it
//! writes are independent of whatever global subscriber the process installs
//! and tests can point it at an in-memory buffer.

use std::fmt;
use std::time::Duration;

use tracing::{Dispatch, info};
use tracing_subscriber::fmt::MakeWriter;

/// One access-log entry. Emitted once per completed request.
#[derive(Clone, Debug)]
pub struct AccessRecord {
    pub client_ip: String,
    /// Request start, RFC 3339.
    pub timestamp: String,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub latency: Duration,
    pub user_agent: String,
}

/// Writes [`AccessRecord`]s as single JSON lines.
///
/// Cloning is cheap; clones share the underlying writer.
#[derive(Clone)]
pub struct AccessLogger {
    dispatch: Dispatch,
}

impl AccessLogger {
    /// Logs to the process's standard output.
    pub fn stdout() -> Self {
        Self::with_writer(std::io::stdout)
    }

    /// Logs to any `tracing_subscriber` writer.
    pub fn with_writer<W>(make_writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .without_time()
            .with_target(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(make_writer)
            .finish();
        Self { dispatch: Dispatch::new(subscriber) }
    }

    /// Emits one record. Write failures are dropped by the formatter; the
    /// caller never sees them.
    pub fn record(&self, record: &AccessRecord) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            info!(
                client_ip = %record.client_ip,
                timestamp = %record.timestamp,
                method = %record.method,
                path = %record.path,
                status = record.status,
                latency = ?record.latency,
                user_agent = %record.user_agent,
                "HTTP request"
            );
        });
    }
}

impl fmt::Debug for AccessLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessLogger").finish_non_exhaustive()
    }
}
