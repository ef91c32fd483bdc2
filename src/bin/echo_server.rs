use std::process;

use clap::Parser;
use log::{error, info};

use pktlog::echo::{EchoServer, ECHO_PORT};
use pktlog::utils::logger::{self, LogLevel};

/// uppercase echo for a single tcp connection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    pub listen_addr: String,
    #[arg(short, long, default_value_t = ECHO_PORT)]
    pub port: u16,
}

fn main() {
    let args = Args::parse();
    logger::init(LogLevel::Info);

    let server = match EchoServer::bind((args.listen_addr.as_str(), args.port)) {
        Ok(server) => server,
        Err(e) => {
            error!("bind {}:{} failed: {}", args.listen_addr, args.port, e);
            process::exit(1);
        }
    };
    info!("echo server waiting on {}:{}", args.listen_addr, args.port);

    if let Err(e) = server.serve_once() {
        error!("echo failed: {}", e);
        process::exit(1);
    }
}
