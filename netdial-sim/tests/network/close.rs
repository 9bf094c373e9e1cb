//! Close semantics of in-memory connections.
//!
//! Validates that closing is final:
//! - Reads and writes after close fail with a closed-connection error
//! - Unread data stays unread
//! - Closing twice is a no-op

use netdial::{is_closed_connection, Connection, Dialer};
use netdial_sim::MemoryDialer;
use std::io::ErrorKind;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn dial_closed() -> netdial_sim::MemoryConn {
    let dialer: MemoryDialer = [("1.2.3.4", "unread")].into_iter().collect();
    let mut conn = dialer.dial("tcp", "1.2.3.4").await.unwrap();
    conn.close().unwrap();
    conn
}

#[tokio::test]
async fn test_read_after_close_fails() {
    let mut conn = dial_closed().await;

    for _ in 0..3 {
        let mut buf = [0u8; 8];
        let err = conn.read(&mut buf).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotConnected);
        assert!(is_closed_connection(&err));
        assert_eq!(buf, [0u8; 8], "no bytes should be copied");
    }
}

#[tokio::test]
async fn test_write_after_close_fails() {
    let mut conn = dial_closed().await;

    for payload in [&b"x"[..], &b""[..], &b"longer payload"[..]] {
        let err = conn.write(payload).await.unwrap_err();
        assert!(is_closed_connection(&err));
    }
    assert_eq!(conn.buffered(), 6);
}

#[tokio::test]
async fn test_close_twice_is_noop() {
    let mut conn = dial_closed().await;
    assert!(conn.close().is_ok());
    assert!(conn.close().is_ok());
    assert!(conn.is_closed());

    // Still closed after the extra calls.
    let mut buf = [0u8; 1];
    assert!(conn.read(&mut buf).await.is_err());
}

#[tokio::test]
async fn test_shutdown_keeps_connection_open() {
    let dialer: MemoryDialer = [("1.2.3.4", "abc")].into_iter().collect();
    let mut conn = dialer.dial("tcp", "1.2.3.4").await.unwrap();

    conn.shutdown().await.unwrap();
    assert!(!conn.is_closed());

    let mut out = String::new();
    conn.read_to_string(&mut out).await.unwrap();
    assert_eq!(out, "abc");
}
