//! Unified error type.

use std::fmt;

/// The error type returned by hostinfo's fallible operations.
///
/// Request outcomes (200, 404) are [`Response`](crate::Response) values, and
/// host lookups degrade to placeholders instead of failing. What remains are
/// socket-level failures: binding the listener or accepting a connection.
#[derive(Debug)]
pub struct Error(std::io::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "io: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}
