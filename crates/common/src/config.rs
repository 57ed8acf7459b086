//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{FramelineError, FramelineResult};

/// Global engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Interactive playback tuning.
    pub playback: PlaybackDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default interactive playback parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackDefaults {
    /// Default FPS used when a project does not specify one.
    pub fps: f64,

    /// Maximum number of concurrently mounted video-backed items.
    /// Bounds decoder resource usage during scrubbing; 0 disables the cap.
    pub max_mounted_items: usize,

    /// Safety window (seconds) of just-started/just-ended items kept
    /// visible around the playhead.
    pub hold_window_secs: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "frameline=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path; logs go to stdout when unset.
    pub file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            fps: 30.0,
            max_mounted_items: 3,
            hold_window_secs: 0.12,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl EngineConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            // No config file yet is the normal first-run state.
            Err(FramelineError::Config { .. }) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load config: {e}");
                Self::default()
            }
        }
    }

    /// Load config from the standard location, failing on a missing or
    /// malformed file.
    pub fn try_load() -> FramelineResult<Self> {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Err(FramelineError::config(format!(
                "no config file at {}",
                config_path.display()
            )));
        }
        let content = std::fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> FramelineResult<()> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("frameline").join("config.json")
}
