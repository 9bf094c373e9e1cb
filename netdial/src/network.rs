//! Dialer abstraction for OS and in-memory networking.
//!
//! This module provides trait-based dialing that allows seamless swapping
//! between real Tokio networking and in-memory connections for testing.

use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::DialError;

/// A bidirectional byte stream produced by a [`Dialer`].
///
/// Reading and writing go through [`AsyncRead`] and [`AsyncWrite`], so any
/// `tokio::io` extension method works on a connection regardless of what
/// backs it.
///
/// ## Deadlines
///
/// A deadline is an absolute point in time after which pending and future
/// I/O fails with [`io::ErrorKind::TimedOut`]. `None` clears the deadline.
/// Implementations that cannot time out (such as in-memory connections) may
/// record the value without enforcing it.
pub trait Connection: AsyncRead + AsyncWrite + Unpin {
    /// Close the connection.
    ///
    /// Any further read or write fails with a closed-connection error.
    fn close(&mut self) -> io::Result<()>;

    /// Local address of the connection, if known.
    fn local_addr(&self) -> Option<SocketAddr>;

    /// Remote address of the connection, if known.
    fn remote_addr(&self) -> Option<SocketAddr>;

    /// Set both the read and write deadlines.
    fn set_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()> {
        self.set_read_deadline(deadline)?;
        self.set_write_deadline(deadline)
    }

    /// Set the deadline for read operations.
    fn set_read_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()>;

    /// Set the deadline for write operations.
    fn set_write_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()>;
}

/// Provider trait for creating connections.
///
/// Single-core design - no Send bounds needed.
/// Code that dials should be generic over this trait so tests can substitute
/// an in-memory dialer for the OS one.
#[async_trait(?Send)]
pub trait Dialer {
    /// The connection type produced by this dialer.
    type Conn: Connection + 'static;

    /// Connect to `addr` over the network named by `network` (e.g. `"tcp"`).
    async fn dial(&self, network: &str, addr: &str) -> Result<Self::Conn, DialError>;
}

/// A dialer bound to a fixed target.
#[async_trait(?Send)]
pub trait Connector {
    /// The connection type produced by this connector.
    type Conn: Connection + 'static;

    /// Establish a new connection to the configured target.
    async fn connect(&self) -> Result<Self::Conn, DialError>;
}
