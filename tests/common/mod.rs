#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};

pub struct HttpReply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpReply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn http_request(addr: SocketAddr, method: &str, path: &str) -> HttpReply {
    let mut conn = TcpStream::connect(addr).expect("connect http");
    let req = format!("{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n", method, path, addr);
    conn.write_all(req.as_bytes()).expect("write request");

    let mut raw = Vec::new();
    conn.read_to_end(&mut raw).expect("read response");
    let raw = String::from_utf8(raw).expect("utf-8 response");

    let (head, body) = raw.split_once("\r\n\r\n").expect("header terminator");
    let mut lines = head.split("\r\n");
    let status_line = lines.next().expect("status line");
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("status code");
    let headers = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    HttpReply {
        status,
        headers,
        body: body.to_string(),
    }
}

/// Sends raw bytes and returns whatever comes back before the server closes.
pub fn raw_exchange(addr: SocketAddr, bytes: &[u8]) -> Vec<u8> {
    let mut conn = TcpStream::connect(addr).expect("connect http");
    conn.write_all(bytes).expect("write raw request");
    let _ = conn.shutdown(std::net::Shutdown::Write);
    let mut raw = Vec::new();
    let _ = conn.read_to_end(&mut raw);
    raw
}

pub fn http_get(addr: SocketAddr, path: &str) -> HttpReply {
    http_request(addr, "GET", path)
}
