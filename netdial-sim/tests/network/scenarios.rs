//! End-to-end dial scenarios against the in-memory dialer.

use netdial::{is_closed_connection, Connection, DialError, Dialer};
use netdial_sim::MemoryDialer;
use std::collections::HashMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::test]
async fn test_dial_and_read_until_end_of_data() {
    let dialer: MemoryDialer = [("1.2.3.4", "hello")].into_iter().collect();
    let mut conn = dialer.dial("tcp", "1.2.3.4").await.unwrap();

    let mut buf = [0u8; 5];
    let n = conn.read(&mut buf).await.unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf, b"hello");

    // Exhausted buffer reports end of data.
    let n = conn.read(&mut buf).await.unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn test_dial_unknown_address_fails() {
    let dialer = MemoryDialer::new(HashMap::new());
    let err = dialer.dial("tcp", "9.9.9.9").await.unwrap_err();

    assert!(matches!(err, DialError::HostNotFound(_)));
    assert!(
        err.to_string().contains("9.9.9.9"),
        "error should name the address: {err}"
    );
}

#[tokio::test]
async fn test_write_after_close_fails_and_writes_nothing() {
    let dialer: MemoryDialer = [("1.2.3.4", "hello")].into_iter().collect();
    let mut conn = dialer.dial("tcp", "1.2.3.4").await.unwrap();
    conn.close().unwrap();

    let err = conn.write(b"x").await.unwrap_err();
    assert!(is_closed_connection(&err));
    assert_eq!(conn.buffered(), 5);
}

#[tokio::test]
async fn test_every_mapped_address_reads_its_content() {
    let content: HashMap<String, String> = (0..16u8)
        .map(|i| (format!("10.0.0.{i}"), format!("payload-{i}").repeat(i as usize + 1)))
        .collect();
    let dialer = MemoryDialer::new(content.clone());

    for (addr, expected) in &content {
        let mut conn = dialer.dial("tcp", addr).await.unwrap();
        let mut out = Vec::new();
        conn.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, expected.as_bytes(), "content mismatch for {addr}");
    }

    for i in 16..32u8 {
        let addr = format!("10.0.0.{i}");
        assert!(matches!(
            dialer.dial("tcp", &addr).await,
            Err(DialError::HostNotFound(a)) if a == addr
        ));
    }
}

#[tokio::test]
async fn test_write_then_read_is_fifo() {
    let dialer: MemoryDialer = [("1.2.3.4", "head:")].into_iter().collect();
    let mut conn = dialer.dial("tcp", "1.2.3.4").await.unwrap();

    conn.write_all(b"first,").await.unwrap();
    conn.write_all(b"second").await.unwrap();
    conn.flush().await.unwrap();

    let mut head = [0u8; 5];
    conn.read_exact(&mut head).await.unwrap();
    assert_eq!(&head, b"head:");

    let mut rest = [0u8; 12];
    conn.read_exact(&mut rest).await.unwrap();
    assert_eq!(&rest, b"first,second");

    assert_eq!(conn.buffered(), 0);
}

#[tokio::test]
async fn test_small_reads_drain_in_order() {
    let dialer: MemoryDialer = [("::1", "abcdefg")].into_iter().collect();
    let mut conn = dialer.dial("tcp6", "::1").await.unwrap();
    assert_eq!(conn.remote_addr(), "[::1]:0".parse().ok());

    let mut collected = Vec::new();
    let mut buf = [0u8; 3];
    loop {
        let n = conn.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        assert!(n <= 3);
        collected.extend_from_slice(&buf[..n]);
    }
    assert_eq!(collected, b"abcdefg");
}
