//! JSON-array record log shared by the logger (writer) and the HTTP view (reader).

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: String,
    pub data: String,
    pub packet_number: u64,
}

impl Record {
    pub fn new(timestamp: impl Into<String>, data: impl Into<String>, packet_number: u64) -> Self {
        Record {
            timestamp: timestamp.into(),
            data: data.into(),
            packet_number,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the log as `[]` (and its directory) when it does not exist yet.
    pub fn ensure(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, b"[]")?;
        debug!("created empty log {}", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<Record>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the whole array, pushes `record` and rewrites the file.
    pub fn append(&self, record: Record) -> Result<usize> {
        let mut records = self.load()?;
        records.push(record);
        let jsonstr = serde_json::to_string_pretty(&records)?;
        self.replace(jsonstr.as_bytes())?;
        Ok(records.len())
    }

    /// Current contents as compact JSON, `[]` when the log is missing.
    pub fn snapshot_json(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let value: serde_json::Value = serde_json::from_str(&content)?;
                Ok(serde_json::to_string(&value)?)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::from("[]")),
            Err(e) => Err(e.into()),
        }
    }

    // readers see either the old or the new file, never a partial write
    fn replace(&self, content: &[u8]) -> io::Result<()> {
        let mut tmp_name = self.path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)
    }
}
