use async_trait::async_trait;
use netdial::{DialError, DialResult, Dialer, DialerConfig};
use std::collections::HashMap;
use std::net::SocketAddr;
use tracing::{debug, trace};

use super::MemoryConn;
use crate::addr::remote_addr_for;

/// Simulated dialer answering from a table of canned payloads.
///
/// Each dial looks the address up as an exact key. A hit produces a fresh
/// [`MemoryConn`] seeded with a copy of the payload; connections never share
/// buffers with each other or with the table. A miss fails with
/// [`DialError::HostNotFound`].
///
/// The network type is accepted but not validated, and dialing never waits,
/// so any context in the configuration is ignored.
///
/// The table can only be changed through `&mut self`, which keeps edits from
/// racing with dials on a shared dialer.
///
/// ## Example
///
/// ```rust,ignore
/// use netdial::Dialer;
/// use netdial_sim::MemoryDialer;
///
/// let dialer: MemoryDialer = [("1.2.3.4", "hello")].into_iter().collect();
/// let conn = dialer.dial("tcp", "1.2.3.4").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDialer {
    content: HashMap<String, String>,
    config: DialerConfig,
}

impl MemoryDialer {
    /// Create a dialer serving `content`.
    pub fn new(content: HashMap<String, String>) -> Self {
        Self {
            content,
            config: DialerConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: DialerConfig) -> Self {
        self.config = config;
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &DialerConfig {
        &self.config
    }

    /// Report `addr` as the local address of new connections.
    pub fn set_local(&mut self, addr: SocketAddr) {
        self.config.local_addr = Some(addr);
    }

    /// Register `content` at `addr`, returning the previous payload.
    ///
    /// Connections already dialed keep the payload they were created with.
    pub fn insert(&mut self, addr: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.content.insert(addr.into(), content.into())
    }

    /// Remove the payload registered at `addr`.
    pub fn remove(&mut self, addr: &str) -> Option<String> {
        self.content.remove(addr)
    }

    /// The payload registered at `addr`.
    pub fn content(&self, addr: &str) -> Option<&str> {
        self.content.get(addr).map(String::as_str)
    }

    /// Number of registered addresses.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether no address is registered.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Dial without going through an async runtime.
    ///
    /// Same semantics as [`Dialer::dial`], which delegates here.
    pub fn dial_now(&self, network: &str, addr: &str) -> DialResult<MemoryConn> {
        let Some(content) = self.content.get(addr) else {
            debug!(network, addr, "no in-memory host registered");
            return Err(DialError::HostNotFound(addr.to_string()));
        };

        trace!(network, addr, bytes = content.len(), "dialed in-memory host");
        Ok(MemoryConn::new(
            content.as_bytes(),
            self.config.local_addr,
            remote_addr_for(addr),
        ))
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryDialer
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[async_trait(?Send)]
impl Dialer for MemoryDialer {
    type Conn = MemoryConn;

    async fn dial(&self, network: &str, addr: &str) -> DialResult<MemoryConn> {
        self.dial_now(network, addr)
    }
}
