use netdial::{Connection, Dialer, OsDialer};
use netdial_sim::MemoryDialer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

// Generic client that works with any Dialer
async fn fetch<D>(dialer: &D, network: &str, addr: &str) -> std::io::Result<String>
where
    D: Dialer,
{
    let mut conn = dialer
        .dial(network, addr)
        .await
        .map_err(std::io::Error::other)?;

    let mut out = Vec::new();
    conn.read_to_end(&mut out).await?;
    conn.close()?;

    Ok(String::from_utf8_lossy(&out).to_string())
}

#[tokio::test]
async fn test_memory_dialer_through_generic_client() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let dialer: MemoryDialer = [("1.2.3.4", "canned response")].into_iter().collect();

    let response = fetch(&dialer, "tcp", "1.2.3.4").await.unwrap();
    assert_eq!(response, "canned response");

    assert!(fetch(&dialer, "tcp", "5.6.7.8").await.is_err());
}

#[tokio::test]
async fn test_os_dialer_through_generic_client() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server_addr = listener.local_addr().unwrap();

    let server_task = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        stream.write_all(b"real response").await.unwrap();
        // Dropping the stream sends FIN so the client sees end of data.
    });

    let response = fetch(&OsDialer::new(), "tcp", &server_addr.to_string())
        .await
        .unwrap();
    assert_eq!(response, "real response");

    server_task.await.unwrap();
}
