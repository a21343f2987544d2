//! optgen CLI
//!
//! Compiles option schemas into a C++ struct declaration header and an
//! X-macro row table.

mod cli;
mod error;

use clap::Parser;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, flag_name};
use error::{CliError, Result};
use optgen_core::{Artifact, Generator, GeneratorConfig};
use optgen_fs::NormalizedPath;

const DEFAULT_PROGRAM: &str = "opt-gen";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: error: {}", program_name(), e);
        std::process::exit(1);
    }
}

/// File name of the running executable, as invoked.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(&NormalizedPath::new(path))?,
        None => GeneratorConfig::default(),
    };
    cli.apply(&mut config);

    if config.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    check_required(&config)?;

    let report = Generator::new(config).run()?;
    tracing::debug!(
        groups = report.groups,
        options = report.options,
        "Generation finished"
    );
    Ok(())
}

/// Reports unset paths by the flag that would set them.
fn check_required(config: &GeneratorConfig) -> Result<()> {
    if config.schemas.is_empty() {
        return Err(CliError::missing_argument("SCHEMA"));
    }
    for artifact in Artifact::ALL {
        let settings = config.artifact(artifact);
        if settings.template.is_none() {
            return Err(CliError::missing_argument(flag_name(artifact, false)));
        }
        if settings.output.is_none() {
            return Err(CliError::missing_argument(flag_name(artifact, true)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_schema_reported_first() {
        let err = check_required(&GeneratorConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "argument 'SCHEMA' is required");
    }

    #[test]
    fn test_missing_input_header() {
        let config = GeneratorConfig {
            schemas: vec!["a.json".into()],
            ..GeneratorConfig::default()
        };
        let err = check_required(&config).unwrap_err();
        assert_eq!(err.to_string(), "argument '--input-header' is required");
    }

    #[test]
    fn test_missing_output_include() {
        let mut config = GeneratorConfig {
            schemas: vec!["a.json".into()],
            ..GeneratorConfig::default()
        };
        config.declaration.template = Some("a.h.in".into());
        config.declaration.output = Some("a.h".into());
        config.table.template = Some("a.inc.in".into());

        let err = check_required(&config).unwrap_err();
        assert_eq!(err.to_string(), "argument '--output-include' is required");
    }

    #[test]
    fn test_program_name_not_empty() {
        assert!(!program_name().is_empty());
    }
}
