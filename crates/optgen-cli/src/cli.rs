//! CLI argument parsing using clap derive

use clap::Parser;
use optgen_core::{Artifact, GeneratorConfig};
use std::path::PathBuf;

/// Compile declarative option schemas into C++ declarations and an X-macro table
#[derive(Parser, Debug)]
#[command(name = "opt-gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Schema documents (JSON, YAML or TOML), loaded in order
    #[arg(value_name = "SCHEMA")]
    pub schemas: Vec<PathBuf>,

    /// Template of the struct declarations
    #[arg(long, value_name = "PATH")]
    pub input_header: Option<PathBuf>,

    /// Output of the struct declarations
    #[arg(long, value_name = "PATH")]
    pub output_header: Option<PathBuf>,

    /// Template of the row table
    #[arg(long, value_name = "PATH")]
    pub input_include: Option<PathBuf>,

    /// Output of the row table
    #[arg(long, value_name = "PATH")]
    pub output_include: Option<PathBuf>,

    /// Generator config file; flags take precedence over its values
    #[arg(short, long, value_name = "PATH", env = "OPTGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Overlays the command-line values onto `config`.
    ///
    /// Path flags replace config values; positional schemas are appended
    /// after the ones listed in the config.
    pub fn apply(self, config: &mut GeneratorConfig) {
        config.verbose |= self.verbose;
        config.schemas.extend(self.schemas);

        let overrides = [
            (Artifact::Declaration, self.input_header, self.output_header),
            (Artifact::Table, self.input_include, self.output_include),
        ];
        for (artifact, template, output) in overrides {
            let settings = config.artifact_mut(artifact);
            if template.is_some() {
                settings.template = template;
            }
            if output.is_some() {
                settings.output = output;
            }
        }
    }
}

/// Name of the flag that sets `artifact`'s template or output.
pub fn flag_name(artifact: Artifact, output: bool) -> &'static str {
    match (artifact, output) {
        (Artifact::Declaration, false) => "--input-header",
        (Artifact::Declaration, true) => "--output-header",
        (Artifact::Table, false) => "--input-include",
        (Artifact::Table, true) => "--output-include",
    }
}
