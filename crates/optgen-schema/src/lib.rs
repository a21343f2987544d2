//! Option schema model and loading for optgen.
//!
//! A schema document maps group names to options, and each option to a
//! mapping of known fields:
//!
//! ```json
//! {
//!   "groups": {
//!     "Graphics": {
//!       "VSync": { "value_type": "bool", "value_default": "true" }
//!     }
//!   }
//! }
//! ```
//!
//! Loading only checks shape and field names. Placeholder resolution and
//! constraint checks happen later, in `optgen-core`.

pub mod error;
pub mod loader;
pub mod model;

pub use error::{Error, Result};
pub use loader::SchemaLoader;
pub use model::{Field, FieldMap, OptionDef, OptionGroup, Schema, ValueType};
