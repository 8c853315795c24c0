// Processors module
pub mod minifier;
pub mod css_processor;
pub mod scss_processor;
pub mod local_bundler;

pub use minifier::*;
pub use css_processor::*;
pub use scss_processor::*;
pub use local_bundler::*;
