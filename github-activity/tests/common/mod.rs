#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// A one-shot HTTP server that answers a single request with a canned response.
pub struct CannedServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    pub fn start(status_line: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("Failed to accept connection");
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream.read(&mut buffer).expect("Failed to read request");
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }
            stream
                .write_all(response.as_bytes())
                .expect("Failed to write response");
            String::from_utf8_lossy(&request).into_owned()
        });

        Self { base_url, handle }
    }

    /// Waits for the request to be served and returns its raw text.
    pub fn request(self) -> String {
        self.handle.join().expect("Test server panicked")
    }
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", address)
}

pub const EVENTS_BODY: &str = r#"[
    {"type": "PushEvent", "repo": {"name": "octocat/hello"}, "payload": {"size": 1}},
    {"type": "PushEvent", "repo": {"name": "octocat/hello"}, "payload": {"size": 2}},
    {"type": "WatchEvent", "repo": {"name": "rust-lang/rust"}, "payload": {"action": "started"}},
    {"type": "GollumEvent", "repo": {"name": "octocat/hello"}, "payload": {"pages": [
        {"page_name": "Home", "action": "created"},
        {"page_name": "Setup", "action": "edited"},
        {"page_name": "Usage", "action": "edited"}
    ]}},
    {"type": "SponsorshipEvent", "repo": {"name": "octocat/hello"}, "payload": {}}
]"#;
