use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Route directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AuditError {
    /// Exit code for a run aborted by this error. The process contract is
    /// binary: 0 on pass, 1 on everything else, including the fatal
    /// missing-root condition.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
