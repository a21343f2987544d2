//! Marker-based injection of generated blocks into template files.
//!
//! A template carries a marker token on one line:
//!
//! ```text
//! namespace engine {
//! ${OPTGEN_DECL_HEADER_OPTIONS}
//! }
//! ```
//!
//! The first line containing the marker is replaced in full by a generated
//! block; all other lines are copied unchanged. The result is written to an
//! output path in one atomic step.

pub mod error;
pub mod injector;

pub use error::{Error, Result};
pub use injector::{Injection, inject_file, render_file, replace_marker_line};
