//! Error types for optgen-core

/// Result type for optgen-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling a schema into artifacts
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Schema could not be loaded
    #[error(transparent)]
    Load(#[from] optgen_schema::Error),

    /// Artifact could not be injected into its template
    #[error(transparent)]
    Inject(#[from] optgen_blocks::Error),

    /// Config file could not be read
    #[error(transparent)]
    Fs(#[from] optgen_fs::Error),

    /// A placeholder names a field the option does not declare
    #[error("option '{group}.{option}': bad substitution '${{{reference}}}' in field '{field}'")]
    UnknownReference {
        group: String,
        option: String,
        field: String,
        reference: String,
    },

    /// Fields of one option reference each other in a cycle
    #[error("option '{group}.{option}': cyclic reference {}", .cycle.join(" -> "))]
    CyclicReference {
        group: String,
        option: String,
        cycle: Vec<String>,
    },

    /// The default value is not one of the allowed values
    #[error(
        "option '{group}.{option}': inconsistent default value '{default}' not in allowed values '{}'",
        .allowed.join(",")
    )]
    InvalidDefault {
        group: String,
        option: String,
        default: String,
        allowed: Vec<String>,
    },

    /// An option's resolved fields are not usable
    #[error("option '{group}.{option}': {message}")]
    Schema {
        group: String,
        option: String,
        message: String,
    },

    /// Generator settings are incomplete
    #[error("{artifact} artifact: missing {setting}")]
    MissingSetting {
        artifact: &'static str,
        setting: &'static str,
    },
}
