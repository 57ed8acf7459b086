//! Logging and tracing initialization.

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::FramelineResult;

/// Install the global tracing subscriber per `config`.
///
/// When `config.file` is set, output is appended there with ANSI colors
/// disabled; otherwise it goes to the default stdout writer. A second
/// call leaves the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) -> FramelineResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let writer = Arc::new(file);
            if config.json {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .with_writer(writer)
                    .json()
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
            } else {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .with_writer(writer)
                    .with_ansi(false)
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
            }
        }
        None => {
            if config.json {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .json()
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
            } else {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_creates_the_log_file() {
        let path = std::env::temp_dir().join("frameline-logging-test.log");
        std::fs::remove_file(&path).ok();

        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(path.clone()),
        };
        init_logging(&config).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unwritable_log_file_reports_io_error() {
        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some("/nonexistent-frameline-dir/engine.log".into()),
        };
        assert!(init_logging(&config).is_err());
    }
}
