use std::fs;
use std::path;

use anyhow::anyhow;
use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;

pub const LOG_FILE_NAME: &str = "runpad.log";

pub fn log_dir() -> path::PathBuf {
    let base = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| path::PathBuf::from("."));

    return base.join("runpad");
}

pub fn parse_level(level: &str) -> LevelFilter {
    return level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
}

/// Sends JSON log lines to a file in the cache directory, since the terminal UI owns
/// stdout. The returned guard flushes pending lines when dropped.
pub fn init(level: &str) -> Result<WorkerGuard> {
    let dir = log_dir();
    fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .json()
        .with_max_level(parse_level(level))
        .with_writer(writer)
        .try_init()
        .map_err(|err| return anyhow!("Failed to initialise logging: {err}"))?;

    tracing::debug!(dir = %dir.display(), level = level, "logging initialised");

    return Ok(guard);
}
