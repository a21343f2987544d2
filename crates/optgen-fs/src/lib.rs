//! Filesystem layer for optgen
//!
//! Provides normalized paths, all-or-nothing file writes and
//! format-agnostic loading of structured documents.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, DocumentFormat};
pub use error::{Error, Result};
pub use path::NormalizedPath;
