//! Error types for the panel layer.

use std::path::PathBuf;

use lc_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("Unknown preset '{name}' (available: {})", .available.join(", "))]
    InvalidPresetSelection {
        name: String,
        available: Vec<String>,
    },

    #[error("Field error: {0}")]
    Field(#[from] CoreError),

    #[error("Invalid panel config: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for panel operations.
pub type PanelResult<T> = Result<T, PanelError>;
