//! Remote-address derivation for in-memory connections.

use std::net::{IpAddr, SocketAddr};

/// Remote address reported by a connection dialed at `target`.
///
/// `target` is parsed as a raw IP literal and paired with port 0. Anything
/// else, including hostnames and `ip:port` pairs, yields `None` even though
/// the dial itself still succeeds.
pub fn remote_addr_for(target: &str) -> Option<SocketAddr> {
    target
        .parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, 0))
}
