//! Request/reply packet logger with a read-only HTTP view of the log, plus a
//! one-shot uppercase echo server.

pub mod echo;
pub mod error;
pub mod messaging;
pub mod option;
pub mod server;
pub mod store;
pub mod utils;
pub mod web;

pub use error::{Error, Result};
