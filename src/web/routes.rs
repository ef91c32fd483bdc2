use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::error;

use super::response::Response;
use crate::store::RecordStore;

pub struct Routes {
    index_file: PathBuf,
    store: RecordStore,
}

impl Routes {
    pub fn new(index_file: impl Into<PathBuf>, store: RecordStore) -> Self {
        Routes {
            index_file: index_file.into(),
            store,
        }
    }

    /// `path` is compared verbatim, query string included.
    pub fn handle(&self, method: &str, path: &str) -> Response {
        if method != "GET" {
            return Response::text(501, &format!("Unsupported method ({})", method));
        }
        match path {
            "/" => self.index(),
            "/data" => self.data(),
            _ => Response::text(404, "404 Not Found"),
        }
    }

    fn index(&self) -> Response {
        match fs::read(&self.index_file) {
            Ok(html) => Response::html(html),
            // still a 200
            Err(e) if e.kind() == ErrorKind::NotFound => Response::html(format!(
                "<h1>File {} not found</h1>",
                self.index_file.display()
            )),
            Err(e) => {
                error!("read {} failed: {}", self.index_file.display(), e);
                Response::text(500, "500 Internal Server Error")
            }
        }
    }

    fn data(&self) -> Response {
        match self.store.snapshot_json() {
            Ok(jsonstr) => Response::json(jsonstr).with_header("Access-Control-Allow-Origin", "*"),
            Err(e) => {
                error!("read {} failed: {}", self.store.path().display(), e);
                Response::text(500, "500 Internal Server Error")
            }
        }
    }
}
