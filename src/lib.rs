// batchmin - batch asset minifier
// Layered like the bundler it grew out of: core domain, infrastructure, utils, cli

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;
