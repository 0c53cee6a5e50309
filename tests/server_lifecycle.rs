//! Server lifecycle tests
//!
//! Exercise the graceful-shutdown contract: the shutdown handle stops the
//! server, requests already in flight still get their response, and the
//! listener refuses new connections afterwards. No database involved.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use accounts_api::server::Server;

fn loopback() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_millis(300)).await;
    "slow response"
}

#[tokio::test]
async fn shutdown_handle_stops_the_server() {
    let server = Server::bind(loopback()).await.expect("bind");
    let handle = server.shutdown_handle();
    let app = Router::new().route("/", get(|| async { "ok" }));

    let task = tokio::spawn(server.serve(app));
    handle.shutdown();

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server did not stop after shutdown")
        .expect("server task panicked");
    assert!(result.is_ok());
}

#[tokio::test]
async fn in_flight_request_completes_during_shutdown() {
    let server = Server::bind(loopback()).await.expect("bind");
    let addr = server.local_addr().expect("local addr");
    let handle = server.shutdown_handle();
    let app = Router::new().route("/slow", get(slow));

    let task = tokio::spawn(server.serve(app));

    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream
        .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .expect("write request");

    // Let the request reach the handler, then ask for shutdown while it is
    // still sleeping.
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.shutdown();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read response");
    let response = String::from_utf8_lossy(&raw);
    assert!(response.starts_with("HTTP/1.1 200"), "got: {}", response);
    assert!(response.contains("slow response"));

    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server did not stop after drain")
        .expect("server task panicked")
        .expect("serve returned an error");

    // Stopped means the listener is gone.
    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn repeated_shutdown_calls_are_harmless() {
    let server = Server::bind(loopback()).await.expect("bind");
    let handle = server.shutdown_handle();
    let second = handle.clone();
    let app = Router::new().route("/", get(|| async { "ok" }));

    let task = tokio::spawn(server.serve(app));
    handle.shutdown();
    second.shutdown();

    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server did not stop")
        .expect("server task panicked")
        .expect("serve returned an error");
}
