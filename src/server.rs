use std::io;
use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;

use log::{debug, info};

use crate::error::Result;
use crate::messaging::RepSocket;
use crate::option::PktlogOption;
use crate::store::{Record, RecordStore};
use crate::utils::get_timestamp;
use crate::web::{Routes, WebServer};

/// Receive side of the logger: owns the per-run packet counter.
pub struct PacketLogger {
    reply: String,
    packet_count: u64,
    store: RecordStore,
}

impl PacketLogger {
    pub fn new(store: RecordStore, reply: impl Into<String>) -> Self {
        PacketLogger {
            reply: reply.into(),
            packet_count: 0,
            store,
        }
    }

    pub fn packet_count(&self) -> u64 {
        self.packet_count
    }

    /// Logs one payload and returns the reply to send back.
    pub fn handle_packet(&mut self, payload: &[u8]) -> Result<String> {
        self.packet_count += 1;
        let message = String::from_utf8_lossy(payload).into_owned();
        info!("received packet #{}: {}", self.packet_count, message);

        let record = Record::new(get_timestamp(), message, self.packet_count);
        let total = self.store.append(record)?;
        debug!("{} records in {}", total, self.store.path().display());

        Ok(self.reply.clone())
    }

    pub fn run(&mut self, socket: &mut RepSocket) -> Result<()> {
        while let Some(payload) = socket.recv()? {
            let response = self.handle_packet(&payload)?;
            socket.send(response.as_bytes())?;
            info!("sent reply: {}", response);
        }
        Ok(())
    }
}

pub struct PktlogServer {
    logger: PacketLogger,
    socket: RepSocket,
    web: WebServer,
}

impl PktlogServer {
    pub fn new(opts: PktlogOption) -> Result<Self> {
        opts.check()?;
        let store = RecordStore::new(&opts.data_file);
        store.ensure()?;

        let socket = RepSocket::bind(&opts.rep_bind_addr())?;
        let routes = Routes::new(&opts.index_file, store.clone());
        let web = WebServer::bind(&opts.http_bind_addr(), routes)?;

        Ok(PktlogServer {
            logger: PacketLogger::new(store, opts.reply),
            socket,
            web,
        })
    }

    pub fn rep_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn web_addr(&self) -> io::Result<SocketAddr> {
        self.web.local_addr()
    }

    /// Starts the HTTP view on a detached thread, then serves requests on
    /// the calling thread until `stop` is raised.
    pub fn bootstrap(self, stop: Arc<AtomicBool>) -> Result<()> {
        let PktlogServer {
            mut logger,
            socket,
            web,
        } = self;

        info!("http view listening on {}", web.get_addr());
        thread::Builder::new()
            .name("web".to_string())
            .spawn(move || web.serve_forever())?;

        let mut socket = socket.with_stop(stop);
        info!("server listening on {}", socket.get_addr());

        let ret = logger.run(&mut socket);
        socket.close();
        info!("server stopped after {} packets", logger.packet_count());
        ret
    }
}
