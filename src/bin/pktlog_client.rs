use std::process;

use clap::Parser;
use colored::Colorize;

use pktlog::messaging::ReqSocket;

/// send messages to a running pktlog and print each reply
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// address of the request/reply port
    #[arg(short, long, default_value = "127.0.0.1:3333")]
    pub addr: String,

    /// messages to send, one request each
    #[arg(required = true)]
    pub messages: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let mut socket = match ReqSocket::connect(args.addr.as_str()) {
        Ok(socket) => socket,
        Err(e) => {
            eprintln!("{} connect {}: {}", "error:".red(), args.addr, e);
            process::exit(1);
        }
    };

    for message in &args.messages {
        match socket.request_string(message) {
            Ok(reply) => println!("{} {} {}", message, "=>".green(), reply),
            Err(e) => {
                eprintln!("{} request {:?}: {}", "error:".red(), message, e);
                process::exit(1);
            }
        }
    }
    socket.close();
}
