use std::io;
use std::net::SocketAddr;

use log::{debug, warn};
use tiny_http::Server;

mod response;
mod routes;

pub use response::Response;
pub use routes::Routes;

/// Read-only HTTP view. Requests are answered one after another on the
/// calling thread.
pub struct WebServer {
    server: Server,
    routes: Routes,
}

impl WebServer {
    /// `addr` is `host:port`; port 0 picks an ephemeral port.
    pub fn bind(addr: &str, routes: Routes) -> io::Result<Self> {
        let server = Server::http(addr).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(WebServer { server, routes })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.server
            .server_addr()
            .to_ip()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "not an ip listener"))
    }

    pub fn get_addr(&self) -> String {
        match self.local_addr() {
            Ok(addr) => format!("http://{}", addr),
            Err(_) => String::from("http://<unbound>"),
        }
    }

    pub fn serve_forever(&self) {
        for request in self.server.incoming_requests() {
            let method = request.method().to_string();
            let path = request.url().to_string();
            let resp = self.routes.handle(&method, &path);
            debug!("{} {} -> {}", method, path, resp.status);
            if let Err(e) = request.respond(resp.into_http()) {
                warn!("http respond error: {}", e);
            }
        }
    }
}
