use bytes::{Bytes, BytesMut};
use netdial::{ClosedConnection, Connection};
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tracing::trace;

/// Simulated connection backed by an in-memory buffer.
///
/// Reads consume bytes from the front of the buffer and writes append to the
/// back, so data written to the connection is read back after whatever
/// content it was seeded with. Once the buffer is drained a read returns
/// zero bytes (end of data).
///
/// Nothing here ever blocks: every poll completes immediately. Deadlines are
/// recorded but never enforced, so no operation fails because time passed.
///
/// After [`close`](Connection::close) every read and write fails with
/// [`ClosedConnection`]. Closing again is a no-op.
#[derive(Debug)]
pub struct MemoryConn {
    buffer: BytesMut,
    local_addr: Option<SocketAddr>,
    remote_addr: Option<SocketAddr>,
    deadline: Option<Instant>,
    read_deadline: Option<Instant>,
    write_deadline: Option<Instant>,
    closed: bool,
}

impl MemoryConn {
    /// Create an open connection whose buffer holds `content`.
    pub fn new(
        content: impl AsRef<[u8]>,
        local_addr: Option<SocketAddr>,
        remote_addr: Option<SocketAddr>,
    ) -> Self {
        Self {
            buffer: BytesMut::from(content.as_ref()),
            local_addr,
            remote_addr,
            deadline: None,
            read_deadline: None,
            write_deadline: None,
            closed: false,
        }
    }

    /// Whether the connection has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of bytes still waiting to be read.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Deadline recorded by [`set_deadline`](Connection::set_deadline).
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Deadline recorded by [`set_read_deadline`](Connection::set_read_deadline).
    pub fn read_deadline(&self) -> Option<Instant> {
        self.read_deadline
    }

    /// Deadline recorded by [`set_write_deadline`](Connection::set_write_deadline).
    pub fn write_deadline(&self) -> Option<Instant> {
        self.write_deadline
    }

    /// Remove up to `max` bytes from the front of the buffer.
    fn take(&mut self, max: usize) -> io::Result<Bytes> {
        if self.closed {
            return Err(ClosedConnection.into());
        }
        let n = max.min(self.buffer.len());
        Ok(self.buffer.split_to(n).freeze())
    }

    fn append(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(ClosedConnection.into());
        }
        self.buffer.extend_from_slice(data);
        Ok(data.len())
    }
}

impl Connection for MemoryConn {
    fn close(&mut self) -> io::Result<()> {
        if !self.closed {
            trace!(
                remote = ?self.remote_addr,
                unread = self.buffer.len(),
                "closing in-memory connection"
            );
        }
        self.closed = true;
        Ok(())
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    fn set_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()> {
        self.deadline = deadline;
        Ok(())
    }

    fn set_read_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()> {
        self.read_deadline = deadline;
        Ok(())
    }

    fn set_write_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()> {
        self.write_deadline = deadline;
        Ok(())
    }
}

impl io::Read for MemoryConn {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = self.take(buf.len())?;
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

impl io::Write for MemoryConn {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.closed {
            return Err(ClosedConnection.into());
        }
        Ok(())
    }
}

impl AsyncRead for MemoryConn {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let chunk = self.get_mut().take(buf.remaining())?;
        buf.put_slice(&chunk);
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MemoryConn {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<Result<usize, io::Error>> {
        Poll::Ready(self.get_mut().append(buf))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(io::Write::flush(self.get_mut()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}
