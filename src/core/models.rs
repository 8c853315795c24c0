use crate::utils::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment a script entrypoint is minified for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Browser,
    #[default]
    Default,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Browser => "browser",
            Target::Default => "default",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options handed to the bundler for a single entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleOptions {
    pub minify: bool,
    pub target: Target,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            minify: true,
            target: Target::Default,
        }
    }
}

/// One entrypoint mapped to one output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub entrypoint: PathBuf,
    pub output_path: PathBuf,
    pub target: Target,
}

impl Job {
    pub fn new(entrypoint: impl Into<PathBuf>, output_path: impl Into<PathBuf>, target: Target) -> Self {
        Self {
            entrypoint: entrypoint.into(),
            output_path: output_path.into(),
            target,
        }
    }

    pub fn options(&self) -> BundleOptions {
        BundleOptions {
            minify: true,
            target: self.target,
        }
    }

    fn resolve(&self, root: &Path) -> Self {
        Self {
            entrypoint: root.join(&self.entrypoint),
            output_path: root.join(&self.output_path),
            target: self.target,
        }
    }
}

/// Ordered list of jobs. Job `i` always owns output `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    jobs: Vec<Job>,
}

impl Manifest {
    /// Rejects an empty job list and output paths shared between jobs.
    pub fn new(jobs: Vec<Job>) -> Result<Self> {
        if jobs.is_empty() {
            return Err(BuildError::config("manifest has no jobs".to_string()));
        }

        let mut seen = HashSet::new();
        for (index, job) in jobs.iter().enumerate() {
            if !seen.insert(job.output_path.as_path()) {
                return Err(BuildError::config(format!(
                    "job {} writes to {}, which another job already owns",
                    index,
                    job.output_path.display()
                )));
            }
        }

        Ok(Self { jobs })
    }

    /// The script and stylesheets shipped with the numbering preprocessor.
    pub fn builtin() -> Self {
        Self {
            jobs: vec![
                Job::new(
                    "src/highlightjs/line-numbers.js",
                    "src/highlightjs/line-numbers-min.js",
                    Target::Browser,
                ),
                Job::new(
                    "src/highlightjs/line-numbers.css",
                    "src/highlightjs/line-numbers-min.css",
                    Target::Default,
                ),
                Job::new(
                    "src/heading/numbering.css",
                    "src/heading/numbering-min.css",
                    Target::Default,
                ),
                Job::new(
                    "src/heading/hide.css",
                    "src/heading/hide-min.css",
                    Target::Default,
                ),
            ],
        }
    }

    /// Join every relative path onto `root`. Absolute paths are kept as they are.
    pub fn resolve(&self, root: &Path) -> Self {
        Self {
            jobs: self.jobs.iter().map(|job| job.resolve(root)).collect(),
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Script,
    Stylesheet,
    Scss,
    Unknown,
}

impl AssetKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx" => AssetKind::Script,
            "css" => AssetKind::Stylesheet,
            "scss" | "sass" => AssetKind::Scss,
            _ => AssetKind::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(AssetKind::Unknown)
    }
}

/// In-memory output of bundling one entrypoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: AssetKind,
    content: Vec<u8>,
}

impl Artifact {
    pub fn new(kind: AssetKind, content: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.content
    }
}

/// Human-readable messages explaining why a source could not be minified.
pub type Diagnostics = Vec<String>;

/// What the bundler hands back for one job.
#[derive(Debug, Clone, Default)]
pub struct BuildResult {
    pub success: bool,
    pub logs: Vec<String>,
    pub outputs: Vec<Artifact>,
}

impl BuildResult {
    pub fn success(artifact: Artifact) -> Self {
        Self {
            success: true,
            logs: Vec::new(),
            outputs: vec![artifact],
        }
    }

    pub fn failure(logs: Vec<String>) -> Self {
        Self {
            success: false,
            logs,
            outputs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WrittenArtifact {
    pub index: usize,
    pub path: PathBuf,
    pub size: usize,
    pub digest: String,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub artifacts: Vec<WrittenArtifact>,
    pub build_time: std::time::Duration,
}

impl BuildReport {
    pub fn total_bytes(&self) -> usize {
        self.artifacts.iter().map(|a| a.size).sum()
    }
}
