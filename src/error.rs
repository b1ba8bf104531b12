use thiserror::Error;

pub type Result<T> = std::result::Result<T, SentinelError>;

#[derive(Error, Debug)]
pub enum SentinelError {
    #[error("Please upload a valid APK file (got {name:?})")]
    InvalidSubmission { name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value {value:?} for {key}")]
    Config { key: String, value: String },

    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Invalid header {0}")]
    Header(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
