use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};

/// How often (ms) a blocked `recv` looks at the stop flag.
const POLL_INTERVAL_MS: i64 = 100;

/// Reply side of the ZeroMQ request/reply pattern.
///
/// Every `recv` that returns a request must be followed by exactly one
/// `send` before the next `recv` is allowed.
pub struct RepSocket {
    // dropped before the context, which waits for its sockets on term
    socket: zmq::Socket,
    _ctx: zmq::Context,
    pending: bool,
    stop: Arc<AtomicBool>,
}

impl RepSocket {
    /// `addr` is `host:port`; port 0 picks an ephemeral port.
    pub fn bind(addr: &str) -> Result<Self> {
        let ctx = zmq::Context::new();
        let socket = ctx.socket(zmq::REP)?;
        socket.set_linger(0)?;
        socket.bind(&tcp_endpoint(addr))?;
        Ok(RepSocket {
            socket,
            _ctx: ctx,
            pending: false,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub fn get_addr(&self) -> String {
        match self.socket.get_last_endpoint() {
            Ok(Ok(endpoint)) => endpoint,
            _ => String::from("tcp://<unbound>"),
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        let endpoint = self.get_addr();
        endpoint
            .trim_start_matches("tcp://")
            .parse()
            .map_err(|_| Error::Protocol(format!("unexpected endpoint {}", endpoint)))
    }

    /// Blocks for the next request. `Ok(None)` means the stop flag was raised.
    /// Multipart requests are joined into one payload.
    pub fn recv(&mut self) -> Result<Option<Vec<u8>>> {
        if self.pending {
            return Err(Error::Protocol(
                "a reply must be sent before receiving the next request".to_string(),
            ));
        }

        loop {
            if self.stop.load(Ordering::SeqCst) {
                return Ok(None);
            }
            match self.socket.poll(zmq::POLLIN, POLL_INTERVAL_MS) {
                Ok(0) | Err(zmq::Error::EINTR) => continue,
                Ok(_) => {}
                Err(e) => return Err(e.into()),
            }
            match self.socket.recv_multipart(zmq::DONTWAIT) {
                Ok(parts) => {
                    self.pending = true;
                    return Ok(Some(parts.concat()));
                }
                Err(zmq::Error::EAGAIN) | Err(zmq::Error::EINTR) => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Sends the reply owed for the last request. A peer that went away in
    /// the meantime simply loses its reply.
    pub fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.pending {
            return Err(Error::Protocol("no request is waiting for a reply".to_string()));
        }
        self.pending = false;
        self.socket.send(data, 0)?;
        Ok(())
    }

    pub fn close(self) {
        debug!("rep socket {} closed", self.get_addr());
    }
}

fn tcp_endpoint(addr: &str) -> String {
    match addr.strip_suffix(":0") {
        Some(host) => format!("tcp://{}:*", host),
        None => format!("tcp://{}", addr),
    }
}
