//! Error types for dialing and connection operations.

use std::io;
use thiserror::Error;

/// Errors that can occur while establishing a connection.
#[derive(Debug, Error)]
pub enum DialError {
    /// No host is registered for the address.
    #[error("host not found: {0}")]
    HostNotFound(String),

    /// The network type is not supported by this dialer.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// The dial context was cancelled before the connection completed.
    #[error("dial cancelled")]
    Cancelled,

    /// The dial context deadline passed before the connection completed.
    #[error("dial deadline exceeded")]
    DeadlineExceeded,

    /// The operating system failed to establish the connection.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for dial operations.
pub type DialResult<T> = Result<T, DialError>;

/// Read or write attempted on a closed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("use of closed connection")]
pub struct ClosedConnection;

impl From<ClosedConnection> for io::Error {
    fn from(err: ClosedConnection) -> Self {
        io::Error::new(io::ErrorKind::NotConnected, err)
    }
}

/// Returns true if `err` was produced by I/O on a closed connection.
pub fn is_closed_connection(err: &io::Error) -> bool {
    err.get_ref()
        .is_some_and(|inner| inner.is::<ClosedConnection>())
}
