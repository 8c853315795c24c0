use crate::core::interfaces::AssetMinifier;
use crate::core::models::{BundleOptions, Diagnostics};
use crate::utils::Logger;
use std::path::Path;
use std::sync::Arc;

/// SCSS/SASS preprocessor using the grass crate
///
/// Compiles SCSS/SASS to CSS and then hands the result to a CSS minifier
/// (Lightning CSS by default)
pub struct ScssProcessor {
    css_processor: Arc<dyn AssetMinifier>,
}

impl ScssProcessor {
    pub fn with_css_processor(css_processor: Arc<dyn AssetMinifier>) -> Self {
        Self { css_processor }
    }

    /// Compile SCSS/SASS to CSS
    fn compile_scss(&self, content: &str, path: &Path, minify: bool) -> Result<String, Diagnostics> {
        let _timer = crate::utils::Timer::start(&format!("Compiling SCSS {}", path.display()));

        // Detect syntax based on file extension
        let syntax = if path.extension().and_then(|s| s.to_str()) == Some("sass") {
            grass::InputSyntax::Sass
        } else {
            grass::InputSyntax::Scss
        };

        let mut options = grass::Options::default()
            .input_syntax(syntax)
            .style(if minify {
                grass::OutputStyle::Compressed
            } else {
                grass::OutputStyle::Expanded
            });
        if let Some(parent) = path.parent() {
            options = options.load_path(parent);
        }

        grass::from_string(content.to_string(), &options).map_err(|e| {
            vec![format!("SCSS compilation error in {}: {}", path.display(), e)]
        })
    }
}

impl AssetMinifier for ScssProcessor {
    fn minify(&self, source: &str, path: &Path, options: BundleOptions) -> Result<String, Diagnostics> {
        let css = self.compile_scss(source, path, options.minify)?;
        Logger::debug(&format!(
            "SCSS compiled: {} -> {} bytes",
            path.display(),
            css.len()
        ));

        self.css_processor.minify(&css, path, options)
    }
}

impl Default for ScssProcessor {
    fn default() -> Self {
        Self::with_css_processor(Arc::new(super::LightningCssProcessor::new()))
    }
}
