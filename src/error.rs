//! Error types for sidepy

use thiserror::Error;

/// Result type alias for sidepy operations
pub type Result<T> = std::result::Result<T, SidepyError>;

/// Errors raised outside the highlighter (which never fails)
#[derive(Error, Debug)]
pub enum SidepyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("variable {name} has invalid value '{value}'")]
    InvalidBinding { name: String, value: String },

    #[error("script is empty")]
    EmptyScript,

    #[error("{kind}: {message}")]
    Execution { kind: String, message: String },

    #[error("no more variable names available")]
    TooManyVariables,

    #[error("cannot remove the last variable")]
    LastVariable,

    #[error("{0}")]
    Usage(String),
}

impl From<toml::de::Error> for SidepyError {
    fn from(err: toml::de::Error) -> Self {
        SidepyError::Config(err.to_string())
    }
}
