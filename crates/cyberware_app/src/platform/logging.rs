//! Platform logging initialization for cyberware_app.
//!
//! Writes logs to `./cyberware.log` in the current working directory.
//! The terminal belongs to the UI, so nothing is logged to stdout.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

const LOG_FILENAME: &str = "cyberware.log";

/// Initialize the file logger at `level`. Silently skips logging when the
/// file cannot be created.
pub fn initialize(level: LevelFilter) {
    let config = build_config();
    let loggers: Vec<Box<dyn SharedLogger>> = match create_file_logger(level, config) {
        Some(file_logger) => vec![file_logger],
        None => return,
    };
    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(".").join(LOG_FILENAME);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
