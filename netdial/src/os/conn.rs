use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
#[cfg(unix)]
use tokio::net::UnixStream;
use tokio::time::Sleep;
use tracing::trace;

use crate::{ClosedConnection, Connection};

fn timed_out() -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, "i/o timeout")
}

/// One direction's deadline plus the lazily armed timer that enforces it.
///
/// The timer is only created from inside a poll, so setting a deadline never
/// requires a running Tokio runtime.
#[derive(Debug, Default)]
struct Deadline {
    at: Option<Instant>,
    timer: Option<Pin<Box<Sleep>>>,
}

impl Deadline {
    fn set(&mut self, at: Option<Instant>) {
        self.at = at;
        self.timer = None;
    }

    fn has_passed(&self) -> bool {
        self.at.is_some_and(|at| at <= Instant::now())
    }

    fn poll_elapsed(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        let Some(at) = self.at else {
            return Poll::Pending;
        };
        let timer = self
            .timer
            .get_or_insert_with(|| Box::pin(tokio::time::sleep_until(at.into())));
        timer.as_mut().poll(cx)
    }
}

/// Socket behind an [`OsConn`].
#[derive(Debug)]
enum Stream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Stream {
    fn poll_read(
        &mut self,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self {
            Stream::Tcp(s) => Pin::new(s).poll_read(cx, buf),
            #[cfg(unix)]
            Stream::Unix(s) => Pin::new(s).poll_read(cx, buf),
        }
    }

    fn poll_write(&mut self, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        match self {
            Stream::Tcp(s) => Pin::new(s).poll_write(cx, buf),
            #[cfg(unix)]
            Stream::Unix(s) => Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(&mut self, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self {
            Stream::Tcp(s) => Pin::new(s).poll_flush(cx),
            #[cfg(unix)]
            Stream::Unix(s) => Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(&mut self, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self {
            Stream::Tcp(s) => Pin::new(s).poll_shutdown(cx),
            #[cfg(unix)]
            Stream::Unix(s) => Pin::new(s).poll_shutdown(cx),
        }
    }
}

/// A connection established by [`OsDialer`](crate::OsDialer).
///
/// Wraps a [`TcpStream`], or a `UnixStream` for the `unix` network, and
/// enforces read and write deadlines: an operation started after its deadline
/// fails immediately, and a pending operation fails once the deadline fires.
/// Both fail with [`io::ErrorKind::TimedOut`].
#[derive(Debug)]
pub struct OsConn {
    stream: Option<Stream>,
    local_addr: Option<SocketAddr>,
    remote_addr: Option<SocketAddr>,
    read_deadline: Deadline,
    write_deadline: Deadline,
}

impl OsConn {
    pub(crate) fn new(stream: TcpStream) -> Self {
        Self {
            local_addr: stream.local_addr().ok(),
            remote_addr: stream.peer_addr().ok(),
            stream: Some(Stream::Tcp(stream)),
            read_deadline: Deadline::default(),
            write_deadline: Deadline::default(),
        }
    }

    /// Unix sockets have no IP addresses to report.
    #[cfg(unix)]
    pub(crate) fn new_unix(stream: UnixStream) -> Self {
        Self {
            local_addr: None,
            remote_addr: None,
            stream: Some(Stream::Unix(stream)),
            read_deadline: Deadline::default(),
            write_deadline: Deadline::default(),
        }
    }

    /// Whether [`close`](Connection::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Borrow the underlying TCP stream, if this is an open TCP connection.
    pub fn tcp_stream(&self) -> Option<&TcpStream> {
        match self.stream.as_ref()? {
            Stream::Tcp(s) => Some(s),
            #[cfg(unix)]
            Stream::Unix(_) => None,
        }
    }
}

impl Connection for OsConn {
    fn close(&mut self) -> io::Result<()> {
        if let Some(stream) = self.stream.take() {
            trace!(remote = ?self.remote_addr, "closing connection");
            drop(stream);
        }
        Ok(())
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    fn set_read_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()> {
        self.read_deadline.set(deadline);
        Ok(())
    }

    fn set_write_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()> {
        self.write_deadline.set(deadline);
        Ok(())
    }
}

impl AsyncRead for OsConn {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let Some(stream) = this.stream.as_mut() else {
            return Poll::Ready(Err(ClosedConnection.into()));
        };
        if this.read_deadline.has_passed() {
            return Poll::Ready(Err(timed_out()));
        }

        match stream.poll_read(cx, buf) {
            Poll::Ready(result) => Poll::Ready(result),
            Poll::Pending => match this.read_deadline.poll_elapsed(cx) {
                Poll::Ready(()) => Poll::Ready(Err(timed_out())),
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

impl AsyncWrite for OsConn {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let Some(stream) = this.stream.as_mut() else {
            return Poll::Ready(Err(ClosedConnection.into()));
        };
        if this.write_deadline.has_passed() {
            return Poll::Ready(Err(timed_out()));
        }

        match stream.poll_write(cx, buf) {
            Poll::Ready(result) => Poll::Ready(result),
            Poll::Pending => match this.write_deadline.poll_elapsed(cx) {
                Poll::Ready(()) => Poll::Ready(Err(timed_out())),
                Poll::Pending => Poll::Pending,
            },
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut().stream.as_mut() {
            Some(stream) => stream.poll_flush(cx),
            None => Poll::Ready(Err(ClosedConnection.into())),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        // Shutting down an already closed connection has nothing left to do.
        match self.get_mut().stream.as_mut() {
            Some(stream) => stream.poll_shutdown(cx),
            None => Poll::Ready(Ok(())),
        }
    }
}
