//! Generator configuration
//!
//! All settings of a run live in one [`GeneratorConfig`] value that is
//! passed into the pipeline. It can be read from a TOML, JSON or YAML file:
//!
//! ```toml
//! verbose = false
//! schemas = ["options/core.json", "options/render.json"]
//!
//! [declaration]
//! template = "src/Options.h.in"
//! output = "build/Options.h"
//!
//! [table]
//! template = "src/Options.inc.in"
//! output = "build/Options.inc"
//! marker = "${OPTGEN_DECL_INCLUDE_OPTIONS}"
//! ```

use crate::emitter::Artifact;
use crate::error::{Error, Result};
use optgen_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;
use std::path::PathBuf;

/// Settings for a whole generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Log every parsing and writing step
    pub verbose: bool,
    /// Schema documents, loaded in this order
    pub schemas: Vec<PathBuf>,
    /// Struct declaration artifact
    pub declaration: ArtifactConfig,
    /// Row table artifact
    pub table: ArtifactConfig,
}

/// Template, output and marker of one artifact. Unset values may still be
/// filled in from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactConfig {
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Overrides the artifact's default marker token
    pub marker: Option<String>,
}

/// Fully specified injection target of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTarget {
    pub artifact: Artifact,
    pub template: NormalizedPath,
    pub output: NormalizedPath,
    pub marker: String,
}

impl GeneratorConfig {
    /// Load a config file; the format follows the extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: GeneratorConfig = ConfigStore::new().load(path)?;
        Ok(config)
    }

    pub fn artifact(&self, artifact: Artifact) -> &ArtifactConfig {
        match artifact {
            Artifact::Declaration => &self.declaration,
            Artifact::Table => &self.table,
        }
    }

    pub fn artifact_mut(&mut self, artifact: Artifact) -> &mut ArtifactConfig {
        match artifact {
            Artifact::Declaration => &mut self.declaration,
            Artifact::Table => &mut self.table,
        }
    }

    pub fn schema_paths(&self) -> Vec<NormalizedPath> {
        self.schemas.iter().map(NormalizedPath::new).collect()
    }

    /// Resolved target of `artifact`.
    ///
    /// # Errors
    /// `Error::MissingSetting` if the template or output path is unset.
    pub fn target(&self, artifact: Artifact) -> Result<ArtifactTarget> {
        let settings = self.artifact(artifact);
        let missing = |setting: &'static str| Error::MissingSetting {
            artifact: artifact.name(),
            setting,
        };

        let template = settings
            .template
            .as_ref()
            .ok_or_else(|| missing("template path"))?;
        let output = settings
            .output
            .as_ref()
            .ok_or_else(|| missing("output path"))?;
        let marker = match settings.marker.as_deref() {
            Some("") => return Err(missing("marker token")),
            Some(marker) => marker.to_string(),
            None => artifact.default_marker().to_string(),
        };

        Ok(ArtifactTarget {
            artifact,
            template: NormalizedPath::new(template),
            output: NormalizedPath::new(output),
            marker,
        })
    }
}
