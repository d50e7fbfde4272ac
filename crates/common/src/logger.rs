use crate::config::AppConfig;
use crate::error::TenderLensError;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log file name inside the configured log directory
pub const LOG_FILE_NAME: &str = "tenderlens.log";

/// Initialize logging to stderr and to `<log_dir>/tenderlens.log`
///
/// Stdout is left alone so analysis output can be piped.
pub fn setup_logging(config: &AppConfig) -> Result<(), TenderLensError> {
    std::fs::create_dir_all(&config.log_dir).map_err(|e| {
        TenderLensError::config(format!(
            "Failed to create log directory {}: {}",
            config.log_dir.display(),
            e
        ))
    })?;

    let log_file_path = config.get_log_path(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            TenderLensError::config(format!(
                "Failed to open log file {}: {}",
                log_file_path.display(),
                e
            ))
        })?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(build_filter(&config.log_level));

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(build_filter(&config.log_level));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| TenderLensError::config(format!("Failed to install logger: {}", e)))?;

    tracing::info!(
        "Logging initialized: level={}, log_file={}",
        config.log_level,
        log_file_path.display()
    );

    Ok(())
}

/// Console-only logging (stderr)
pub fn setup_console_logging(log_level: &str) -> Result<(), TenderLensError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(build_filter(log_level))
        .try_init()
        .map_err(|e| TenderLensError::config(format!("Failed to install logger: {}", e)))?;

    tracing::debug!("Console logging initialized: level={}", log_level);

    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_log_level(log_level).as_str().to_lowercase()))
}

/// Parse string to tracing Level
pub fn parse_log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to INFO", level);
            Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace"), Level::TRACE);
        assert_eq!(parse_log_level("debug"), Level::DEBUG);
        assert_eq!(parse_log_level("warn"), Level::WARN);
        assert_eq!(parse_log_level("error"), Level::ERROR);
        assert_eq!(parse_log_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("INFO"), Level::INFO);
        assert_eq!(parse_log_level("WARNING"), Level::WARN);
    }
}
