use crate::core::models::*;
use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// Turns one entrypoint into a minified artifact.
///
/// Diagnostics about the source itself (syntax errors, unsupported file
/// types) belong in a failed [`BuildResult`]; an `Err` means the bundler
/// could not run at all.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, entrypoint: &Path, options: BundleOptions) -> Result<BuildResult>;
}

/// File system operations interface
#[async_trait]
pub trait FileSystemService: Send + Sync {
    /// Overwrite `path` with `content` and set its permission bits to `mode`.
    /// The parent directory must already exist.
    async fn write_file(&self, path: &Path, content: &[u8], mode: u32) -> Result<()>;
}

/// Synchronous minifier for one kind of source. CPU bound; callers run it
/// off the async executor.
pub trait AssetMinifier: Send + Sync {
    fn minify(
        &self,
        source: &str,
        path: &Path,
        options: BundleOptions,
    ) -> std::result::Result<String, Diagnostics>;
}
