//! In-memory connections record deadlines but never time out.

use netdial::{Connection, Dialer};
use netdial_sim::MemoryDialer;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::test]
async fn test_past_deadlines_do_not_time_out() {
    let dialer: MemoryDialer = [("1.2.3.4", "hello")].into_iter().collect();
    let mut conn = dialer.dial("tcp", "1.2.3.4").await.unwrap();

    let past = Instant::now() - Duration::from_secs(1);
    conn.set_deadline(Some(past)).unwrap();
    conn.set_read_deadline(Some(past)).unwrap();
    conn.set_write_deadline(Some(past)).unwrap();

    conn.write_all(b" world").await.unwrap();

    let mut out = String::new();
    conn.read_to_string(&mut out).await.unwrap();
    assert_eq!(out, "hello world");
}

#[tokio::test]
async fn test_deadlines_survive_io() {
    let dialer: MemoryDialer = [("1.2.3.4", "x")].into_iter().collect();
    let mut conn = dialer.dial("tcp", "1.2.3.4").await.unwrap();
    assert_eq!(conn.deadline(), None);
    assert_eq!(conn.read_deadline(), None);
    assert_eq!(conn.write_deadline(), None);

    let at = Instant::now() + Duration::from_millis(5);
    conn.set_read_deadline(Some(at)).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let mut buf = [0u8; 1];
    assert_eq!(conn.read(&mut buf).await.unwrap(), 1);
    assert_eq!(conn.read_deadline(), Some(at));

    conn.set_read_deadline(None).unwrap();
    assert_eq!(conn.read_deadline(), None);
}
