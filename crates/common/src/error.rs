//! Error types shared across Frameline crates.

/// Top-level error type for Frameline operations.
///
/// The per-frame query path never returns errors (a failed query on a hot
/// render path would blank the screen); this type serves configuration
/// loading and logging setup.
#[derive(Debug, thiserror::Error)]
pub enum FramelineError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using FramelineError.
pub type FramelineResult<T> = Result<T, FramelineError>;

impl FramelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
