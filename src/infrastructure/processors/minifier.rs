use crate::core::interfaces::AssetMinifier;
use crate::core::models::{BundleOptions, Diagnostics, Target};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_diagnostics::OxcDiagnostic;
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

/// JavaScript/TypeScript minification using oxc
pub struct OxcMinifier {
    mangle: bool,
    compress: bool,
}

impl OxcMinifier {
    pub fn new() -> Self {
        Self {
            mangle: true,
            compress: true,
        }
    }

    /// Browser entrypoints are loaded as ES modules; otherwise the extension decides.
    fn source_type(path: &Path, target: Target) -> SourceType {
        match target {
            Target::Browser => SourceType::from_path(path)
                .map(|source_type| source_type.with_module(true))
                .unwrap_or_else(|_| SourceType::mjs()),
            Target::Default => SourceType::from_path(path).unwrap_or_default(),
        }
    }

    fn format_errors(path: &Path, errors: &[OxcDiagnostic]) -> Diagnostics {
        errors
            .iter()
            .map(|e| format!("{}: parse error: {}", path.display(), e))
            .collect()
    }
}

impl AssetMinifier for OxcMinifier {
    fn minify(&self, source: &str, path: &Path, options: BundleOptions) -> Result<String, Diagnostics> {
        let _timer = crate::utils::Timer::start(&format!("Minifying {}", path.display()));

        let allocator = Allocator::default();
        let source_type = Self::source_type(path, options.target);

        let parse_result = Parser::new(&allocator, source, source_type).parse();
        if parse_result.panicked || !parse_result.errors.is_empty() {
            return Err(Self::format_errors(path, &parse_result.errors));
        }

        let mut program = parse_result.program;
        if !options.minify {
            return Ok(Codegen::new().build(&program).code);
        }

        let minifier_options = MinifierOptions {
            mangle: self.mangle.then(MangleOptions::default),
            compress: self.compress.then(CompressOptions::default),
        };
        let minified = Minifier::new(minifier_options).minify(&allocator, &mut program);

        let code = Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(minified.scoping)
            .build(&program)
            .code;

        Ok(code)
    }
}

impl Default for OxcMinifier {
    fn default() -> Self {
        Self::new()
    }
}
