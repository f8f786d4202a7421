//! Minimal HTTP/1.1 server serving a canned browse-archive tree for
//! integration tests.
//!
//! Routes are an exact-path map to (status, body). Unknown paths return 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// Starts a server in a background thread serving `routes`. Returns the base
/// URL (e.g. "http://127.0.0.1:12345"). The server runs until the process
/// exits.
pub fn start(routes: HashMap<String, (u16, Vec<u8>)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, (u16, Vec<u8>)>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let mut first_line = request.lines().next().unwrap_or("").split_whitespace();
    let method = first_line.next().unwrap_or("");
    let path = first_line.next().unwrap_or("");

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
        return;
    }

    let (status, body) = match routes.get(path) {
        Some((status, body)) => (*status, body.as_slice()),
        None => (404, &b"not found"[..]),
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Renders an autoindex page the way the archive's web server does: a
/// title, four column-sort anchors, a parent-directory anchor, then one
/// anchor per entry.
pub fn listing_html(entries: &[&str]) -> String {
    let anchors: Vec<String> = entries
        .iter()
        .map(|e| format!("            <a href=\"{e}\">{e}</a>"))
        .collect();
    format!(
        r#"<html>
    <head>
        <title>Index of /assets/img/browse</title>
    </head>
    <body>
        <pre>
            <h1>Index of /assets/img/browse</h1>
            <a href="?C=N;O=D">Name</a>
            <a href="?C=M;O=A">Last modified</a>
            <a href="?C=S;O=A">Size</a>
            <a href="?C=D;O=A">Description</a><hr><img src="/icons/back.gif">
            <a href="/assets/img/">Parent Directory</a>
{}
        </pre>
    </body>
</html>"#,
        anchors.join("\n")
    )
}
