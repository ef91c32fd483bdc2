use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};

use pktlog::option::PktlogOption;
use pktlog::server::PktlogServer;
use pktlog::utils::logger::{self, LogLevel};

/// pktlog stores every request it receives and shows the log over http
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// json config file, built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<String>,
}

fn main() {
    let args = Args::parse();

    let pktopts = match &args.config {
        Some(path) => match PktlogOption::load(path) {
            Ok(opts) => opts,
            Err(e) => {
                eprintln!("read config file {} failed: {}", path, e);
                process::exit(2);
            }
        },
        None => PktlogOption::default(),
    };

    let level = pktopts.log_level.parse::<LogLevel>().unwrap_or_else(|e| {
        eprintln!("{}, falling back to info", e);
        LogLevel::Info
    });
    logger::init(level);

    match serde_json::to_string_pretty(&pktopts) {
        Ok(jsonstr) => info!("pktopts:\n{}", jsonstr),
        Err(e) => warn!("cannot print options: {}", e),
    }

    let stop = Arc::new(AtomicBool::new(false));
    let stop2 = stop.clone();
    if let Err(e) = ctrlc::set_handler(move || stop2.store(true, Ordering::SeqCst)) {
        warn!("install ctrl-c handler failed: {}", e);
    }

    let svc = match PktlogServer::new(pktopts) {
        Ok(svc) => svc,
        Err(e) => {
            error!("start server failed: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = svc.bootstrap(stop) {
        error!("server failed: {}", e);
        process::exit(1);
    }
}
