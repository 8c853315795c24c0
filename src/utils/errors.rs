use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    /// The bundler reported `success: false` for a job.
    #[error("Build {index} failed:\n{}", logs.join("\n"))]
    BundleFailure { index: usize, logs: Vec<String> },

    /// The bundler succeeded but did not hand back exactly one artifact.
    #[error("Build {index} produced {}", describe_count(*count))]
    UnexpectedOutputCount { index: usize, count: usize },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Minification task failed: {0}")]
    Task(String),
}

fn describe_count(count: usize) -> &'static str {
    if count == 0 {
        "no outputs."
    } else {
        "multiple outputs."
    }
}

impl BuildError {
    pub fn config(message: String) -> Self {
        Self::Config(message)
    }

    pub fn write_failure(path: PathBuf, source: std::io::Error) -> Self {
        Self::WriteFailure { path, source }
    }

    /// Index of the manifest job this error belongs to, when there is one.
    pub fn job_index(&self) -> Option<usize> {
        match self {
            BuildError::BundleFailure { index, .. }
            | BuildError::UnexpectedOutputCount { index, .. } => Some(*index),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

impl From<tokio::task::JoinError> for BuildError {
    fn from(err: tokio::task::JoinError) -> Self {
        BuildError::Task(err.to_string())
    }
}
