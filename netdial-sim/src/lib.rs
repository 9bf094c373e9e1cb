//! # netdial-sim
//!
//! In-memory stand-ins for [`netdial`]'s dialer and connection traits.
//!
//! A [`MemoryDialer`] holds a table of address to payload. Dialing an address
//! in the table returns a [`MemoryConn`] preloaded with that payload; dialing
//! anything else fails with [`DialError::HostNotFound`](netdial::DialError).
//! No sockets are opened and nothing ever waits, which keeps tests that
//! exercise network-facing code deterministic.
//!
//! ## Quick Start
//!
//! ```ignore
//! use netdial::Dialer;
//! use netdial_sim::MemoryDialer;
//! use tokio::io::AsyncReadExt;
//!
//! let dialer: MemoryDialer = [("1.2.3.4", "hello")].into_iter().collect();
//! let mut conn = dialer.dial("tcp", "1.2.3.4").await?;
//! let mut buf = [0u8; 5];
//! conn.read_exact(&mut buf).await?;
//! assert_eq!(&buf, b"hello");
//! ```
//!
//! ## Limitations
//!
//! - Deadlines are recorded but never enforced.
//! - Writes land in the connection's own buffer and are read back by the same
//!   connection; there is no peer.
//! - The remote address is only known when the dialed address is a bare IP
//!   literal (reported with port 0).

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

/// Remote-address derivation for in-memory connections.
pub mod addr;

/// In-memory dialer and connection.
pub mod memory;

pub use memory::{MemoryConn, MemoryDialer};
