use std::io::{self, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};

use log::info;

pub const ECHO_PORT: u16 = 9090;
const CHUNK_SIZE: usize = 1024;

/// Accepts a single connection and sends every chunk back uppercased.
pub struct EchoServer {
    listener: TcpListener,
}

impl EchoServer {
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(EchoServer { listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves exactly one peer and returns how many bytes were echoed.
    /// Both sockets are closed when this returns.
    pub fn serve_once(self) -> io::Result<u64> {
        let (mut conn, addr) = self.listener.accept()?;
        info!("connected {}", addr);

        let mut buffer = [0u8; CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let n = match conn.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let chunk = &mut buffer[..n];
            info!("received {}", String::from_utf8_lossy(chunk));
            chunk.make_ascii_uppercase();
            conn.write_all(chunk)?;
            total += n as u64;
        }

        info!("peer {} closed, {} bytes echoed", addr, total);
        Ok(total)
    }
}
