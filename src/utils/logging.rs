use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. Logs go to stderr; stdout is reserved
    /// for the completion line.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("batchmin=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn build_start(root: &Path, job_count: usize) {
        info!("🔨 Minifying assets");
        info!("📁 Root: {}", root.display());
        info!("📦 Jobs: {}", job_count);
    }

    pub fn bundling(index: usize, entrypoint: &Path, target: &str) {
        debug!("⚡ Job {}: {} ({})", index, entrypoint.display(), target);
    }

    pub fn artifact_written(path: &Path, size: usize, digest: &str) {
        let short = &digest[..12.min(digest.len())];
        debug!("💾 Wrote {} ({} bytes, blake3 {})", path.display(), size, short);
    }

    pub fn build_complete(job_count: usize, total_bytes: usize, build_time: std::time::Duration) {
        info!("📊 {} artifacts, {} bytes in {:.2?}", job_count, total_bytes, build_time);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
