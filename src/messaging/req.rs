use std::fmt::Display;

use crate::error::Result;

/// Request side: every `request` sends one message and blocks for its reply.
pub struct ReqSocket {
    socket: zmq::Socket,
    _ctx: zmq::Context,
}

impl ReqSocket {
    /// `addr` is `host:port`, e.g. `127.0.0.1:3333`.
    pub fn connect(addr: impl Display) -> Result<Self> {
        let ctx = zmq::Context::new();
        let socket = ctx.socket(zmq::REQ)?;
        socket.set_linger(0)?;
        socket.connect(&format!("tcp://{}", addr))?;
        Ok(ReqSocket { socket, _ctx: ctx })
    }

    pub fn request(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.socket.send(data, 0)?;
        Ok(self.socket.recv_bytes(0)?)
    }

    pub fn request_string(&mut self, message: &str) -> Result<String> {
        let reply = self.request(message.as_bytes())?;
        Ok(String::from_utf8_lossy(&reply).into_owned())
    }

    pub fn close(self) {
        drop(self.socket);
    }
}
