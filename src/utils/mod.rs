use chrono::Local;

pub mod logger;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock time, second precision.
pub fn get_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
