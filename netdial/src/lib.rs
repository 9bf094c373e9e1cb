//! # netdial
//!
//! Dialer abstraction that lets code depend on "something that can open a
//! connection" instead of the operating system's socket API.
//!
//! - [`Dialer`]: turn a network type and an address into a [`Connection`]
//! - [`Connection`]: async byte stream with close, deadlines and addresses
//! - [`Connector`]: a dialer bound to one fixed target
//!
//! ## Implementations
//!
//! - [`OsDialer`] / [`OsConn`] / [`OsConnector`]: real TCP and unix sockets via Tokio
//! - `MemoryDialer` / `MemoryConn` (in `netdial-sim`): canned in-memory
//!   payloads keyed by address, for deterministic tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use netdial::{Connection, Dialer};
//! use tokio::io::AsyncReadExt;
//!
//! async fn fetch<D: Dialer>(dialer: &D, addr: &str) -> std::io::Result<Vec<u8>> {
//!     let mut conn = dialer.dial("tcp", addr).await.map_err(std::io::Error::other)?;
//!     let mut out = Vec::new();
//!     conn.read_to_end(&mut out).await?;
//!     conn.close()?;
//!     Ok(out)
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod config;
mod error;
mod network;
mod os;
mod types;

// Configuration exports
pub use config::{DialContext, DialerConfig};

// Error exports
pub use error::{is_closed_connection, ClosedConnection, DialError, DialResult};

// Trait exports
pub use network::{Connection, Connector, Dialer};

// OS implementation exports
pub use os::{OsConn, OsConnector, OsDialer};

// Core type exports
pub use types::Network;

pub use tokio_util::sync::CancellationToken;
