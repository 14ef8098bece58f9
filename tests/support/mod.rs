use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use std::io::{prelude::*, BufReader};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

struct Capture {
    lines: Mutex<Vec<String>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{} {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

static LOGS: Lazy<Capture> = Lazy::new(|| Capture {
    lines: Mutex::new(vec![]),
});

/// Installs the capturing logger; later calls are no-ops.
pub fn capture_logs() {
    if log::set_logger(&*LOGS).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

/// Captured log lines mentioning `needle`. Tests share the logger, so filter on something unique.
pub fn logged(needle: &str) -> Vec<String> {
    LOGS.lines
        .lock()
        .unwrap()
        .iter()
        .filter(|x| x.contains(needle))
        .cloned()
        .collect()
}

pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

pub fn route(method: &'static str, path: &'static str, status: u16, body: impl Into<String>) -> Route {
    Route {
        method,
        path,
        status,
        body: body.into(),
    }
}

/// A request as seen by the server: request line, lowercased headers, body.
#[derive(Debug, Clone)]
pub struct Request {
    pub line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub struct Server {
    pub base: String,
    pub requests: Arc<Mutex<Vec<Request>>>,
}

/// Serves canned responses on a random local port until the test process exits.
pub fn serve(routes: Vec<Route>) -> Server {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let requests = Arc::new(Mutex::new(vec![]));
    let seen = requests.clone();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(_) => continue,
            };
            handle(stream, &routes, &seen);
        }
    });

    Server { base, requests }
}

fn handle(stream: TcpStream, routes: &[Route], seen: &Mutex<Vec<Request>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    let line = line.trim_end().to_string();

    let mut headers = vec![];
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).unwrap();
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((k, v)) = header.split_once(':') {
            headers.push((k.trim().to_lowercase(), v.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).unwrap();

    let mut parts = line.split(' ');
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("").to_string();
    let path = target.split('?').next().unwrap_or("");

    let (status, payload) = routes
        .iter()
        .find(|r| r.method == method && r.path == path)
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, "not found".to_string()));

    seen.lock().unwrap().push(Request {
        line,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} Canned\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    )
    .unwrap();
    stream.flush().unwrap();
}
