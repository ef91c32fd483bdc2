use std::io::Write;
use std::str::FromStr;

use chrono::Local;
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

/// Installs the global logger. `RUST_LOG` wins over `level` when set.
/// Calling it twice is harmless; the first logger stays.
pub fn init(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.into());
    builder.parse_default_env();
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level_str(record.level()),
            record.args()
        )
    });
    let _ = builder.try_init();
}

fn level_str(level: Level) -> ColoredString {
    match level {
        Level::Trace => "TRACE".dimmed(),
        Level::Debug => "DEBUG".blue(),
        Level::Info => "INFO".green(),
        Level::Warn => "WARN".yellow(),
        Level::Error => "ERROR".red(),
    }
}
