use crate::core::models::{Job, Manifest, Target};
use crate::utils::{BuildError, Logger, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "batchmin.config.json";

/// Configuration file format (batchmin.config.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BatchminConfig {
    /// Jobs in build order; the position of a job is its index in error messages
    pub jobs: Vec<JobConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobConfig {
    /// Source file handed to the minifier (e.g. "src/heading/hide.css")
    pub entrypoint: String,

    /// Where the minified bytes are written; its directory must exist
    pub output: String,

    /// "browser" or "default" (default: "default")
    #[serde(default)]
    pub target: Target,
}

impl From<BatchminConfig> for Vec<Job> {
    fn from(config: BatchminConfig) -> Self {
        config
            .jobs
            .into_iter()
            .map(|job| Job::new(job.entrypoint, job.output, job.target))
            .collect()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load batchmin.config.json from the project root if it exists
    pub fn load_from_file(root: &Path) -> Result<Option<BatchminConfig>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            Logger::debug(&format!("No {} found, using built-in manifest", CONFIG_FILE_NAME));
            return Ok(None);
        }

        Self::load_path(&config_path).map(Some)
    }

    /// Load an explicitly named config file. A missing file is an error.
    pub fn load_path(config_path: &Path) -> Result<BatchminConfig> {
        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(config_path).map_err(BuildError::Io)?;

        serde_json::from_str(&content).map_err(|e| {
            BuildError::config(format!("Failed to parse {}: {}", config_path.display(), e))
        })
    }

    /// Pick the manifest for a run (CLI path > file in root > built-in) and
    /// resolve its paths against `root`. A relative CLI path is taken from
    /// `root`, never from the working directory.
    pub fn resolve_manifest(root: &Path, config_path: Option<&Path>) -> Result<Manifest> {
        let file_config = match config_path {
            Some(path) => Some(Self::load_path(&root.join(path))?),
            None => Self::load_from_file(root)?,
        };

        let manifest = match file_config {
            Some(config) => Manifest::new(config.into())?,
            None => Manifest::builtin(),
        };

        Ok(manifest.resolve(root))
    }
}
