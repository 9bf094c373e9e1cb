//! Dialer configuration.
//!
//! Both fields of [`DialerConfig`] are optional. Missing values are resolved
//! to defaults at the start of each dial, the stored configuration is never
//! touched by dialing.

use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Cancellation and deadline signals for a dial.
///
/// The default context never cancels and has no deadline.
#[derive(Debug, Clone, Default)]
pub struct DialContext {
    cancel: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl DialContext {
    /// A context that never cancels and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Cancel the dial when `token` is cancelled.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Abandon the dial once `deadline` passes.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abandon the dial `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The cancellation token, if any.
    pub fn cancel_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the token has already fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }

    /// Whether the deadline has already passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| d <= Instant::now())
    }
}

/// Configuration shared by the OS and in-memory dialers.
#[derive(Debug, Clone, Default)]
pub struct DialerConfig {
    /// Local address to bind before connecting.
    pub local_addr: Option<SocketAddr>,
    /// Context used when the caller does not pass one explicitly.
    pub context: Option<DialContext>,
}

impl DialerConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind connections to `addr`.
    pub fn with_local_addr(mut self, addr: SocketAddr) -> Self {
        self.local_addr = Some(addr);
        self
    }

    /// Use `context` for dials that don't supply their own.
    pub fn with_context(mut self, context: DialContext) -> Self {
        self.context = Some(context);
        self
    }

    /// The configured context, or a background one.
    ///
    /// Returns an owned value so resolution never writes back into `self`.
    pub fn resolve_context(&self) -> DialContext {
        self.context.clone().unwrap_or_default()
    }
}
