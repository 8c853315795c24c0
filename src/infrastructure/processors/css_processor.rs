use crate::core::interfaces::AssetMinifier;
use crate::core::models::{BundleOptions, Diagnostics};
use crate::utils::Logger;
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions as CssParserOptions, StyleSheet},
};
use std::path::Path;

pub struct LightningCssProcessor;

impl LightningCssProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl AssetMinifier for LightningCssProcessor {
    fn minify(&self, source: &str, path: &Path, options: BundleOptions) -> Result<String, Diagnostics> {
        let _timer = crate::utils::Timer::start(&format!("Processing CSS {}", path.display()));

        let filename = path.display().to_string();
        Logger::debug(&format!("🎨 Processing CSS: {}", filename));

        let parser_options = CssParserOptions {
            filename: filename.clone(),
            ..CssParserOptions::default()
        };
        let mut stylesheet = StyleSheet::parse(source, parser_options)
            .map_err(|e| vec![format!("{}: {}", filename, e)])?;

        if options.minify {
            stylesheet
                .minify(MinifyOptions::default())
                .map_err(|e| vec![format!("{}: {}", filename, e)])?;
        }

        let printed = stylesheet
            .to_css(PrinterOptions {
                minify: options.minify,
                ..Default::default()
            })
            .map_err(|e| vec![format!("{}: {}", filename, e)])?;

        Ok(printed.code)
    }
}

impl Default for LightningCssProcessor {
    fn default() -> Self {
        Self::new()
    }
}
