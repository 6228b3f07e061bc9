//! One-shot HTTP stub for exercising the prediction client on a real socket.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Serves exactly one request with a canned response and records what the
/// client sent, so tests can assert on the wire contract.
pub struct StubServer {
    pub url: String,
    request_rx: Receiver<String>,
}

impl StubServer {
    /// Spawn a listener that answers the first connection with `status_line`
    /// (e.g. `"200 OK"`) and `body`, then closes.
    pub fn serve_once(status_line: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        let (tx, request_rx) = mpsc::channel();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request(&mut stream);
                let _ = tx.send(request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        Self {
            url: format!("http://{addr}"),
            request_rx,
        }
    }

    /// Block until the stub has seen a request, returning its raw text.
    pub fn take_request(&self) -> String {
        self.request_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("stub should have received a request")
    }

    /// Assert that nothing reached the stub within a grace period.
    pub fn assert_no_request(&self) {
        assert!(
            self.request_rx
                .recv_timeout(Duration::from_millis(300))
                .is_err(),
            "no request should have been issued"
        );
    }
}

/// Read one HTTP request, honoring Content-Length so split segments are
/// reassembled before the response is written.
fn read_request(stream: &mut TcpStream) -> String {
    let mut bytes = Vec::new();
    let mut buf = [0u8; 8 * 1024];
    loop {
        let Ok(read) = stream.read(&mut buf) else {
            break;
        };
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&buf[..read]);
        if let Some(header_end) = find_header_end(&bytes) {
            let headers = String::from_utf8_lossy(&bytes[..header_end]).to_string();
            let body_len = content_length(&headers).unwrap_or(0);
            if bytes.len() >= header_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&bytes).to_string()
}

fn find_header_end(bytes: &[u8]) -> Option<usize> {
    bytes.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(headers: &str) -> Option<usize> {
    headers.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

/// Extract the JSON body from a recorded raw request.
pub fn request_body(raw: &str) -> &str {
    raw.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
}
