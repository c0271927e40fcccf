use crate::registry::RegistryError;
use std::io;
use thiserror::Error;

/// Startup failures. Any of these aborts the process before it serves traffic.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config `{path}`: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid yaml: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("CORS registration failed: {0}")]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
