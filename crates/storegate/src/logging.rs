use std::fs::OpenOptions;
use std::path::PathBuf;

use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global logger is already installed")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub level: LevelFilter,
    pub terminal: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            terminal: true,
            log_file: None,
        }
    }
}

fn logger_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("storegate")
        .build()
}

fn build_loggers(options: &LogOptions) -> Result<Vec<Box<dyn SharedLogger>>, LoggingError> {
    let config = logger_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if options.terminal {
        loggers.push(TermLogger::new(
            options.level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    if let Some(path) = &options.log_file {
        let open_error = |source| LoggingError::OpenFile {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(open_error)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_error)?;
        loggers.push(WriteLogger::new(options.level, config, file));
    }

    Ok(loggers)
}

/// Install a global logger for the `storegate` crates.
///
/// Hosts that already run their own `log` backend should skip this.
///
/// # Errors
/// Returns an error when the log file cannot be opened or another logger is
/// already installed.
pub fn init_logging(options: &LogOptions) -> Result<(), LoggingError> {
    let loggers = build_loggers(options)?;
    if loggers.is_empty() {
        return Ok(());
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

pub fn set_logging_enabled(enabled: bool) {
    if enabled {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Off);
    }
}
