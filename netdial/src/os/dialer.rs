use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpSocket, TcpStream};
use tracing::{debug, instrument};

use super::OsConn;
use crate::{DialContext, DialError, DialResult, Dialer, DialerConfig, Network};

/// Real dialer backed by the operating system's TCP and unix socket stack.
///
/// ## Example
///
/// ```rust,ignore
/// use netdial::{Dialer, OsDialer};
///
/// let mut dialer = OsDialer::new();
/// dialer.set_local("127.0.0.1:0".parse()?);
/// let conn = dialer.dial("tcp", "127.0.0.1:4500").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct OsDialer {
    config: DialerConfig,
}

impl OsDialer {
    /// Create a dialer with no local address and a background context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dialer from an explicit configuration.
    pub fn with_config(config: DialerConfig) -> Self {
        Self { config }
    }

    /// The current configuration.
    pub fn config(&self) -> &DialerConfig {
        &self.config
    }

    /// Bind outgoing connections to `addr`.
    pub fn set_local(&mut self, addr: SocketAddr) {
        self.config.local_addr = Some(addr);
    }

    /// Dial using `ctx` instead of the configured context.
    ///
    /// Errors from the operating system are returned as [`DialError::Io`]
    /// without further interpretation.
    #[instrument(skip(self, ctx))]
    pub async fn dial_context(
        &self,
        ctx: &DialContext,
        network: &str,
        addr: &str,
    ) -> DialResult<OsConn> {
        let network: Network = network.parse()?;
        if ctx.is_cancelled() {
            return Err(DialError::Cancelled);
        }
        if ctx.is_expired() {
            return Err(DialError::DeadlineExceeded);
        }

        if network == Network::Unix {
            return connect_unix(ctx, addr).await;
        }
        let stream = with_context(ctx, self.connect_tcp(network, addr)).await?;
        Ok(OsConn::new(stream))
    }

    async fn connect_tcp(&self, network: Network, addr: &str) -> io::Result<TcpStream> {
        let local = self.config.local_addr;
        let mut last_err = None;

        for remote in tokio::net::lookup_host(addr).await? {
            if !network.accepts(&remote) {
                continue;
            }
            // A bound local address pins the address family.
            if local.is_some_and(|l| l.is_ipv4() != remote.is_ipv4()) {
                continue;
            }
            match connect_one(local, remote).await {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!(%remote, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("no suitable {network} address for {addr}"),
            )
        }))
    }
}

async fn connect_one(local: Option<SocketAddr>, remote: SocketAddr) -> io::Result<TcpStream> {
    let Some(local) = local else {
        return TcpStream::connect(remote).await;
    };
    let socket = if remote.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.bind(local)?;
    socket.connect(remote).await
}

/// The local address, if configured, does not apply to unix sockets.
#[cfg(unix)]
async fn connect_unix(ctx: &DialContext, path: &str) -> DialResult<OsConn> {
    let stream = with_context(ctx, tokio::net::UnixStream::connect(path)).await?;
    Ok(OsConn::new_unix(stream))
}

#[cfg(not(unix))]
async fn connect_unix(_ctx: &DialContext, _path: &str) -> DialResult<OsConn> {
    Err(DialError::UnknownNetwork(Network::Unix.to_string()))
}

/// Run `fut` until it completes, the token fires or the deadline passes.
async fn with_context<T, F>(ctx: &DialContext, fut: F) -> DialResult<T>
where
    F: Future<Output = io::Result<T>>,
{
    let bounded = async {
        match ctx.deadline() {
            Some(deadline) => match tokio::time::timeout_at(deadline.into(), fut).await {
                Ok(result) => result.map_err(DialError::from),
                Err(_) => Err(DialError::DeadlineExceeded),
            },
            None => fut.await.map_err(DialError::from),
        }
    };

    match ctx.cancel_token() {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(DialError::Cancelled),
            result = bounded => result,
        },
        None => bounded.await,
    }
}

#[async_trait(?Send)]
impl Dialer for OsDialer {
    type Conn = OsConn;

    async fn dial(&self, network: &str, addr: &str) -> DialResult<OsConn> {
        let ctx = self.config.resolve_context();
        self.dial_context(&ctx, network, addr).await
    }
}
