use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::fetch::FetchOptions;

pub mod urls_tests;

/// Fetch options with no pacing delay so tests run quickly.
pub fn quick_options() -> FetchOptions {
    FetchOptions {
        delay: Duration::from_millis(0),
        ..FetchOptions::default()
    }
}

/// Build a minimal HTTP/1.1 response with the given status line and body.
pub fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Serve the same canned response for up to `max_requests` connections.
///
/// Returns the server address and a counter of requests actually
/// handled, so tests can assert how many attempts the fetcher made.
pub fn serve_canned_response(
    response: String,
    max_requests: usize,
) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let handler_hits = Arc::clone(&hits);

    thread::spawn(move || {
        for _ in 0..max_requests {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            handler_hits.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            read_request(&mut stream);
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (addr, hits)
}

/// Read one HTTP request up to the end of its headers.
fn read_request(stream: &mut TcpStream) {
    let mut buffer = [0u8; 1024];
    let mut request = Vec::new();
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buffer[..n]),
        }
    }
}

/// An address that refuses connections: bind an ephemeral port, then
/// drop the listener.
pub fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
