use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]

pub struct PktlogOption {
    #[serde(default = "listen_addr_default")]
    pub listen_addr: String,
    #[serde(default = "rep_port_default")]
    pub rep_port: u16,
    #[serde(default = "http_port_default")]
    pub http_port: u16,
    #[serde(default = "data_file_default")]
    pub data_file: String,
    #[serde(default = "index_file_default")]
    pub index_file: String,
    #[serde(default = "reply_default")]
    pub reply: String,
    #[serde(default = "loglevel_default")]
    pub log_level: String,
}

impl Default for PktlogOption {
    fn default() -> Self {
        PktlogOption {
            listen_addr: listen_addr_default(),
            rep_port: rep_port_default(),
            http_port: http_port_default(),
            data_file: data_file_default(),
            index_file: index_file_default(),
            reply: reply_default(),
            log_level: loglevel_default(),
        }
    }
}

impl PktlogOption {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let fscontent = fs::read_to_string(path.as_ref())?;
        let opts: PktlogOption = serde_json::from_str(&fscontent)?;
        opts.check()?;
        Ok(opts)
    }

    pub fn check(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(Error::Config("dataFile must not be empty".to_string()));
        }
        if self.index_file.trim().is_empty() {
            return Err(Error::Config("indexFile must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn rep_bind_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.rep_port)
    }

    pub fn http_bind_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.http_port)
    }
}

fn listen_addr_default() -> String {
    String::from("0.0.0.0")
}

fn rep_port_default() -> u16 {
    3333
}

fn http_port_default() -> u16 {
    8080
}

fn data_file_default() -> String {
    String::from("received_data.json")
}

fn index_file_default() -> String {
    String::from("index.html")
}

fn reply_default() -> String {
    String::from("Hello from Server")
}

fn loglevel_default() -> String {
    String::from("info")
}
