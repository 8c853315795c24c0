use crate::core::{interfaces::*, models::*};
use crate::utils::{BuildError, Logger, Result, Timer};
use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use std::time::Instant;

/// Permission bits every output file ends up with.
pub const OUTPUT_MODE: u32 = 0o644;

/// Runs a manifest: bundle every job, validate the results in job order,
/// then write every artifact to its job's output path.
pub struct AssetBuildService {
    fs_service: Arc<dyn FileSystemService>,
    bundler: Arc<dyn Bundler>,
}

impl AssetBuildService {
    pub fn new(fs_service: Arc<dyn FileSystemService>, bundler: Arc<dyn Bundler>) -> Self {
        Self {
            fs_service,
            bundler,
        }
    }

    pub async fn build(&self, manifest: &Manifest) -> Result<BuildReport> {
        let _timer = Timer::start("Asset build");
        let start = Instant::now();

        let results = self.bundle_all(manifest).await?;

        let artifacts = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| validate_result(index, result))
            .collect::<Result<Vec<_>>>()?;

        let written = self.write_all(manifest, artifacts).await?;

        let report = BuildReport {
            artifacts: written,
            build_time: start.elapsed(),
        };
        Logger::build_complete(report.artifacts.len(), report.total_bytes(), report.build_time);

        Ok(report)
    }

    /// Start every bundle before awaiting any; results come back in job order.
    async fn bundle_all(&self, manifest: &Manifest) -> Result<Vec<BuildResult>> {
        let tasks = manifest.jobs().iter().enumerate().map(|(index, job)| {
            Logger::bundling(index, &job.entrypoint, job.target.as_str());
            self.bundler.bundle(&job.entrypoint, job.options())
        });

        join_all(tasks).await.into_iter().collect()
    }

    async fn write_all(
        &self,
        manifest: &Manifest,
        artifacts: Vec<Artifact>,
    ) -> Result<Vec<WrittenArtifact>> {
        let writes = manifest
            .jobs()
            .iter()
            .zip(artifacts)
            .enumerate()
            .map(|(index, (job, artifact))| async move {
                let bytes = artifact.into_bytes();
                self.fs_service
                    .write_file(&job.output_path, &bytes, OUTPUT_MODE)
                    .await?;

                let digest = blake3::hash(&bytes).to_hex().to_string();
                Logger::artifact_written(&job.output_path, bytes.len(), &digest);

                Ok::<_, BuildError>(WrittenArtifact {
                    index,
                    path: job.output_path.clone(),
                    size: bytes.len(),
                    digest,
                })
            });

        try_join_all(writes).await
    }
}

/// Accept a result only if it succeeded with exactly one artifact.
pub fn validate_result(index: usize, result: BuildResult) -> Result<Artifact> {
    if !result.success {
        return Err(BuildError::BundleFailure {
            index,
            logs: result.logs,
        });
    }

    let count = result.outputs.len();
    let mut outputs = result.outputs.into_iter();
    match (outputs.next(), count) {
        (Some(artifact), 1) => Ok(artifact),
        _ => Err(BuildError::UnexpectedOutputCount { index, count }),
    }
}
