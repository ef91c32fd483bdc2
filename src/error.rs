use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Log file or config file holds something that is not the expected JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("zmq error: {0}")]
    Zmq(#[from] zmq::Error),

    /// Request/reply ordering was broken by the caller or the peer.
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
