//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed path → (status, body) table; unknown paths get 404. Every
//! response closes the connection. Routes may carry a delay, and the server
//! records the peak number of requests it was handling at once.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Handle to a running server. The server runs until the process exits.
pub struct IconServer {
    /// `127.0.0.1:<port>`, usable as the manifest `host`.
    pub host: String,
    hits: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl IconServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.host, path)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Highest number of requests that were being handled at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread answering from `routes`.
pub fn start(routes: HashMap<String, (u16, String)>) -> IconServer {
    start_with_delays(routes, HashMap::new())
}

/// Like [`start`], but sleeps `delays[path]` before answering that path.
pub fn start_with_delays(
    routes: HashMap<String, (u16, String)>,
    delays: HashMap<String, Duration>,
) -> IconServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let delays = Arc::new(delays);
    let hits = Arc::new(AtomicUsize::new(0));
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    let peak_srv = Arc::clone(&peak);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let delays = Arc::clone(&delays);
            let hits = Arc::clone(&hits_srv);
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak_srv);
            thread::spawn(move || {
                hits.fetch_add(1, Ordering::SeqCst);
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                handle(stream, &routes, &delays, &in_flight);
            });
        }
    });
    IconServer {
        host: format!("127.0.0.1:{}", port),
        hits,
        peak,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, (u16, String)>,
    delays: &HashMap<String, Duration>,
    in_flight: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => {
            in_flight.fetch_sub(1, Ordering::SeqCst);
            return;
        }
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    if let Some(delay) = delays.get(&path) {
        thread::sleep(*delay);
    }
    // Released before the reply goes out, so the client can never start its
    // next request while this one still counts.
    in_flight.fetch_sub(1, Ordering::SeqCst);

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, "not found".to_string()));
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
