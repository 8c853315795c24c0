use crate::core::{interfaces::*, models::*};
use crate::utils::{Logger, Result, Timer};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::{LightningCssProcessor, OxcMinifier, ScssProcessor};

/// In-process bundler: reads the entrypoint and minifies it with the
/// minifier registered for its extension.
pub struct LocalBundler {
    script: Arc<dyn AssetMinifier>,
    stylesheet: Arc<dyn AssetMinifier>,
    scss: Arc<dyn AssetMinifier>,
}

impl LocalBundler {
    pub fn new() -> Self {
        let stylesheet: Arc<dyn AssetMinifier> = Arc::new(LightningCssProcessor::new());
        Self {
            script: Arc::new(OxcMinifier::new()),
            scss: Arc::new(ScssProcessor::with_css_processor(stylesheet.clone())),
            stylesheet,
        }
    }

    fn minifier_for(&self, kind: AssetKind) -> Option<Arc<dyn AssetMinifier>> {
        match kind {
            AssetKind::Script => Some(self.script.clone()),
            AssetKind::Stylesheet => Some(self.stylesheet.clone()),
            AssetKind::Scss => Some(self.scss.clone()),
            AssetKind::Unknown => None,
        }
    }
}

#[async_trait]
impl Bundler for LocalBundler {
    async fn bundle(&self, entrypoint: &Path, options: BundleOptions) -> Result<BuildResult> {
        let _timer = Timer::start(&format!("Bundling {}", entrypoint.display()));

        let kind = AssetKind::from_path(entrypoint);
        let Some(minifier) = self.minifier_for(kind) else {
            return Ok(BuildResult::failure(vec![format!(
                "No loader is configured for {}",
                entrypoint.display()
            )]));
        };

        let source = match tokio::fs::read_to_string(entrypoint).await {
            Ok(source) => source,
            Err(e) => {
                return Ok(BuildResult::failure(vec![format!(
                    "Could not read {}: {}",
                    entrypoint.display(),
                    e
                )]));
            }
        };

        // Run minification in a blocking task since it is CPU-intensive
        let path = entrypoint.to_path_buf();
        let outcome =
            tokio::task::spawn_blocking(move || minifier.minify(&source, &path, options)).await?;

        Ok(match outcome {
            Ok(code) => BuildResult::success(Artifact::new(kind, code)),
            Err(logs) => {
                Logger::warn(&format!(
                    "{} reported {} problem(s)",
                    entrypoint.display(),
                    logs.len()
                ));
                BuildResult::failure(logs)
            }
        })
    }
}

impl Default for LocalBundler {
    fn default() -> Self {
        Self::new()
    }
}
