use std::time::Duration;

use burrow::protocol::render::render_menu;
use burrow::protocol::{ItemKind, Menu, TcpTransport, Target, Transport, TransportError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// ============================================================================
// Helper Functions
// ============================================================================

/// Serves `body` to one client and returns the request line it received.
async fn serve_once(body: &'static [u8]) -> (u16, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut byte = [0u8; 1];
        while !request.ends_with(b"\r\n") {
            if socket.read(&mut byte).await.unwrap() == 0 {
                break;
            }
            request.push(byte[0]);
        }
        // The client may hang up early when it truncates
        let _ = socket.write_all(body).await;
        let _ = socket.shutdown().await;
        String::from_utf8(request).unwrap()
    });

    (port, handle)
}

fn transport(max_response_bytes: usize) -> TcpTransport {
    TcpTransport::new(
        Duration::from_secs(5),
        Duration::from_secs(5),
        max_response_bytes,
    )
}

// ============================================================================
// Fetching
// ============================================================================

#[tokio::test]
async fn test_fetch_and_parse_menu() {
    let body: &'static [u8] = b"1Example dir\t/dir\tex.org\t70\r\n\
        i---\t\t\t\r\n\
        0A file\t/file.txt\tex.org\t70\r\n\
        .\r\n";
    let (port, server) = serve_once(body).await;

    let target = Target::new("127.0.0.1", port.to_string(), "/menu");
    let response = transport(1024 * 1024).fetch(&target).await.unwrap();

    assert_eq!(server.await.unwrap(), "/menu\r\n");
    assert!(!response.truncated);
    assert_eq!(response.body, body);

    let menu = Menu::from_bytes(&response.body);
    assert_eq!(menu.selectable_count(), 2);
    assert_eq!(menu.get(1).unwrap().kind, ItemKind::Directory);
    assert_eq!(menu.get(2).unwrap().selector, "/file.txt");
    assert_eq!(
        render_menu(&menu),
        "(1) Example dir/\n---\n(2) A file\n"
    );
}

#[tokio::test]
async fn test_root_request_is_bare_crlf() {
    let (port, server) = serve_once(b"iRoot\r\n.\r\n").await;

    let target = Target::new("127.0.0.1", port.to_string(), "");
    transport(1024).fetch(&target).await.unwrap();

    assert_eq!(server.await.unwrap(), "\r\n");
}

#[tokio::test]
async fn test_oversized_response_is_truncated() {
    let (port, server) = serve_once(b"iaaaaaaaaaa\r\nibbbbbbbbbb\r\n.\r\n").await;

    let target = Target::new("127.0.0.1", port.to_string(), "");
    let response = transport(8).fetch(&target).await.unwrap();
    server.await.unwrap();

    assert!(response.truncated);
    assert!(response.body.len() <= 8);
    assert!(b"iaaaaaaaaaa".starts_with(&response.body));
}

#[tokio::test]
async fn test_connect_refused() {
    // Bind then drop to get a port nobody is listening on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let target = Target::new("127.0.0.1", port.to_string(), "");
    let err = transport(1024).fetch(&target).await.unwrap_err();

    match err {
        TransportError::Connect { endpoint, .. } => {
            assert_eq!(endpoint, format!("127.0.0.1:{port}"));
        }
        other => panic!("expected Connect, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_port_is_connect_error() {
    let target = Target::new("127.0.0.1", "seventy", "");
    let err = transport(1024).fetch(&target).await.unwrap_err();
    assert!(matches!(err, TransportError::Connect { .. }));
    assert_eq!(err.user_message(), "can't connect to 127.0.0.1:seventy");
}
