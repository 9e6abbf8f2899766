//! Integration tests for the fetch protocol against a loopback server
//!
//! Each test binds a one-shot TCP listener, answers the single request
//! with a canned response, and checks what reached the destination.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

use mprsh::fetch::{FetchError, HttpFetch};

/// Serve one connection with a canned response, returning the raw
/// request bytes the client sent.
fn serve_once(response: &'static [u8]) -> (SocketAddr, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut socket, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).expect("read request");
            request.extend_from_slice(&chunk[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        socket.write_all(response).expect("write response");
        request
    });

    (addr, handle)
}

#[test]
fn test_roundtrip_writes_exact_body() {
    let (addr, server) =
        serve_once(b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\n\r\nHELLO");
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("hello.txt");

    let outcome = HttpFetch::new("127.0.0.1", "files/hello.txt")
        .port(addr.port())
        .download(&dest)
        .expect("fetch succeeds");

    assert_eq!(outcome.bytes_written, 5);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "HELLO");
    assert_eq!(outcome.header.get("Content-Type"), Some("text/plain"));

    let request = server.join().unwrap();
    assert_eq!(
        request,
        b"GET /files/hello.txt HTTP/1.0\r\nHost: 127.0.0.1\r\n\r\n"
    );
}

#[test]
fn test_non_200_leaves_no_file_and_carries_the_table() {
    let (addr, server) = serve_once(b"HTTP/1.0 404 Not Found\r\nServer: t\r\n\r\n");
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("absent.bin");

    let err = HttpFetch::new("127.0.0.1", "missing/file")
        .port(addr.port())
        .download(&dest)
        .unwrap_err();

    match err {
        FetchError::Status { header } => {
            assert_eq!(header.code, "404");
            assert!(header.dump_lines().contains(&"Code = 404".to_string()));
            assert_eq!(header.get("Server"), Some("t"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(!dest.exists());
    server.join().unwrap();
}

#[test]
fn test_binary_body_is_copied_verbatim() {
    let (addr, server) = serve_once(
        b"HTTP/1.0 200 OK\r\nContent-Type: application/octet-stream\r\n\r\n\x00\x01\xfe\xff",
    );
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("blob");

    let outcome = HttpFetch::new("127.0.0.1", "data/blob")
        .port(addr.port())
        .download(&dest)
        .expect("fetch succeeds");

    assert_eq!(outcome.bytes_written, 4);
    assert_eq!(std::fs::read(&dest).unwrap(), vec![0x00, 0x01, 0xfe, 0xff]);
    server.join().unwrap();
}

#[test]
fn test_unresolvable_host_is_a_clean_error() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("never");

    let err = HttpFetch::new("host.invalid.", "a/b")
        .download(&dest)
        .unwrap_err();

    assert!(matches!(err, FetchError::Resolve { .. }));
    assert!(!dest.exists());
}
