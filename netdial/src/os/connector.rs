use async_trait::async_trait;

use super::{OsConn, OsDialer};
use crate::{Connector, DialContext, DialResult};

/// An [`OsDialer`] bound to one network and address.
///
/// When `context` is `None` the dialer's configured context is used, falling
/// back to a background context. The fallback is resolved on every call.
#[derive(Debug, Clone)]
pub struct OsConnector {
    /// Dialer used for each connection attempt.
    pub dialer: OsDialer,
    /// Network type, e.g. `"tcp"`.
    pub network: String,
    /// Target address, e.g. `"127.0.0.1:4500"`.
    pub addr: String,
    /// Context overriding the dialer's own.
    pub context: Option<DialContext>,
}

impl OsConnector {
    /// Create a connector for `network`/`addr`.
    pub fn new(dialer: OsDialer, network: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            dialer,
            network: network.into(),
            addr: addr.into(),
            context: None,
        }
    }

    /// Use `context` for every connect.
    pub fn with_context(mut self, context: DialContext) -> Self {
        self.context = Some(context);
        self
    }
}

#[async_trait(?Send)]
impl Connector for OsConnector {
    type Conn = OsConn;

    async fn connect(&self) -> DialResult<OsConn> {
        let ctx = match &self.context {
            Some(ctx) => ctx.clone(),
            None => self.dialer.config().resolve_context(),
        };
        self.dialer
            .dial_context(&ctx, &self.network, &self.addr)
            .await
    }
}
