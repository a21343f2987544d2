//! End-to-end generation: load, resolve, validate, emit, inject.

use crate::config::{ArtifactTarget, GeneratorConfig};
use crate::emitter::Artifact;
use crate::error::Result;
use crate::resolver::resolve_schema;
use crate::validator::{OptionSet, validate_schema};
use optgen_blocks::{Injection, inject_file, render_file};
use optgen_schema::SchemaLoader;
use std::path::PathBuf;

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub groups: usize,
    pub options: usize,
    /// Output files in the order they were written
    pub written: Vec<PathBuf>,
}

/// Drives a full generation run from a [`GeneratorConfig`].
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    loader: SchemaLoader,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            loader: SchemaLoader::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Loads, resolves and validates all schemas.
    ///
    /// Any failure here aborts the run before a single file is written.
    pub fn compile(&self) -> Result<OptionSet> {
        let mut schema = self.loader.load_files(&self.config.schema_paths())?;
        tracing::debug!(
            groups = schema.groups().len(),
            options = schema.option_count(),
            "Loaded schemas"
        );

        resolve_schema(&mut schema)?;
        let options = validate_schema(&schema)?;
        Ok(options)
    }

    /// Renders `target`'s artifact into its template without writing.
    pub fn render(&self, options: &OptionSet, target: &ArtifactTarget) -> Result<Injection> {
        let block = target.artifact.render(options);
        Ok(render_file(&target.template, &target.marker, &block)?)
    }

    /// Renders `target`'s artifact and writes it to the target's output.
    pub fn write_artifact(&self, options: &OptionSet, target: &ArtifactTarget) -> Result<Injection> {
        tracing::debug!(
            artifact = target.artifact.name(),
            template = %target.template,
            "Generating artifact"
        );
        let block = target.artifact.render(options);
        let injection = inject_file(&target.template, &target.output, &target.marker, &block)?;
        tracing::info!(
            artifact = target.artifact.name(),
            output = %target.output,
            "Wrote artifact"
        );
        Ok(injection)
    }

    /// Runs the whole pipeline: declaration artifact first, then table.
    ///
    /// Each artifact is written on its own; a failing table artifact does
    /// not undo an already written declaration artifact.
    pub fn run(&self) -> Result<GenerationReport> {
        let targets = Artifact::ALL
            .into_iter()
            .map(|artifact| self.config.target(artifact))
            .collect::<Result<Vec<_>>>()?;

        let options = self.compile()?;

        let mut report = GenerationReport {
            groups: options.groups().len(),
            options: options.option_count(),
            written: Vec::with_capacity(targets.len()),
        };
        for target in &targets {
            self.write_artifact(&options, target)?;
            report.written.push(target.output.to_native());
        }
        Ok(report)
    }
}
