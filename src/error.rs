// error taxonomy for the library surface
//
// analysis itself is total and never returns an error; only the generator,
// analyzer construction and config loading can fail.

use std::path::PathBuf;

/// errors reported by passvet
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// bad generator parameters or invalid analyzer settings
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// a config file could not be read or parsed
    #[error("failed to load {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// the embedded defaults or the dictionary automaton failed to build
    #[error("failed to build analyzer: {0}")]
    Build(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }

    /// true for the recoverable InvalidConfiguration condition
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
