//! Real networking implementation using Tokio.

mod conn;
mod connector;
mod dialer;

pub use conn::OsConn;
pub use connector::OsConnector;
pub use dialer::OsDialer;
