use std::path::PathBuf;

use thiserror::Error;

/// Custom error types for printqr
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {path}: {message}")]
    ConfigRead { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    ConfigValidation(String),

    #[error("unknown print setting '{0}'")]
    UnknownSetting(String),

    #[error("invalid value for '{path}': expected {expected}")]
    SettingValue { path: String, expected: &'static str },

    #[error("template error: {0}")]
    Template(String),

    #[error("invalid date template '{0}'")]
    DateTemplate(String),

    #[error("payload encoding failed: {0}")]
    Encode(String),

    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("caption error: {0}")]
    Caption(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid path: {0}")]
    PathError(String),
}

/// Result type for printqr operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
