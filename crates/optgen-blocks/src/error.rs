//! Error types for optgen-blocks

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] optgen_fs::Error),

    #[error("template file '{path}' does not exist")]
    MissingInput { path: PathBuf },

    #[error("couldn't find {marker} in '{path}'")]
    MarkerNotFound { marker: String, path: PathBuf },
}
