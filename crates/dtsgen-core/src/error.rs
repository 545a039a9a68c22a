use thiserror::Error;

/// Core error type for dtsgen operations.
#[derive(Error, Debug)]
pub enum DtsgenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DtsgenError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            DtsgenError::Io(e.into())
        } else if e.is_data() || e.is_syntax() || e.is_eof() {
            DtsgenError::Deserialization(e.to_string())
        } else {
            DtsgenError::Serialization(e.to_string())
        }
    }
}

/// Result type alias using DtsgenError.
pub type Result<T> = std::result::Result<T, DtsgenError>;
