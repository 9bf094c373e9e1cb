//! In-memory dialer and connection.

mod conn;
mod dialer;

pub use conn::MemoryConn;
pub use dialer::MemoryDialer;
