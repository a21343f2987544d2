//! Error types for optgen-schema

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] optgen_fs::Error),

    #[error("invalid schema file {path}: {message}")]
    Schema { path: PathBuf, message: String },

    #[error("invalid schema file {path}: invalid key '{key}' of option '{group}.{option}'")]
    UnknownField {
        path: PathBuf,
        group: String,
        option: String,
        key: String,
    },
}

impl Error {
    pub fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}
