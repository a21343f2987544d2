//! Schema resolution and code synthesis for optgen.
//!
//! The pipeline runs leaf-first:
//!
//! 1. [`optgen_schema::SchemaLoader`] reads schema documents into groups.
//! 2. [`resolver`] substitutes `${field}` placeholders inside each option.
//! 3. [`validator`] checks defaults against allowed values and synthesizes
//!    check predicates and metavars, producing a frozen [`OptionSet`].
//! 4. [`emitter`] renders the declaration and table artifacts.
//! 5. [`optgen_blocks`] injects each artifact into its template.
//!
//! [`Generator`] drives the whole sequence from a [`GeneratorConfig`].

pub mod config;
pub mod emitter;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod validator;

pub use config::{ArtifactConfig, ArtifactTarget, GeneratorConfig};
pub use emitter::{Artifact, emit_declarations, emit_table};
pub use error::{Error, Result};
pub use pipeline::{GenerationReport, Generator};
pub use resolver::{resolve_option, resolve_schema};
pub use validator::{
    CheckPredicate, OptionSet, ValidatedGroup, ValidatedOption, validate_option, validate_schema,
};
