use crate::core::{models::*, services::*};
use crate::infrastructure::{LocalBundler, TokioFileSystemService};
use crate::utils::{ConfigLoader, Logger, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const COMPLETION_MESSAGE: &str = "Build completed.";

#[derive(Parser)]
#[command(name = "batchmin")]
#[command(about = "Minify a fixed set of scripts and stylesheets into their -min files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Minify every job in the manifest (default)
    Build {
        /// Root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// Manifest file, relative paths are taken from <root> (defaults to <root>/batchmin.config.json, then the built-in list)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the resolved manifest without building
    List {
        /// Root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// Manifest file, relative paths are taken from <root> (defaults to <root>/batchmin.config.json, then the built-in list)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        // Initialize logging
        Logger::init();

        let cli = Cli::parse();
        let mut stdout = std::io::stdout();
        self.dispatch(cli, &mut stdout).await
    }

    pub async fn dispatch(&self, cli: Cli, out: &mut impl Write) -> Result<()> {
        match cli.command {
            None => self.handle_build_command(Path::new("."), None, out).await,
            Some(Commands::Build { root, config }) => {
                self.handle_build_command(&root, config.as_deref(), out).await
            }
            Some(Commands::List { root, config }) => {
                self.handle_list_command(&root, config.as_deref(), out)
            }
        }
    }

    async fn handle_build_command(
        &self,
        root: &Path,
        config: Option<&Path>,
        out: &mut impl Write,
    ) -> Result<()> {
        let manifest = ConfigLoader::resolve_manifest(root, config)?;
        Logger::build_start(root, manifest.len());

        let service = AssetBuildService::new(
            Arc::new(TokioFileSystemService),
            Arc::new(LocalBundler::new()),
        );

        run_build(&service, &manifest, out).await?;
        Ok(())
    }

    fn handle_list_command(
        &self,
        root: &Path,
        config: Option<&Path>,
        out: &mut impl Write,
    ) -> Result<()> {
        let manifest = ConfigLoader::resolve_manifest(root, config)?;

        for (index, job) in manifest.jobs().iter().enumerate() {
            writeln!(
                out,
                "{}: {} -> {} ({})",
                index,
                job.entrypoint.display(),
                job.output_path.display(),
                job.target
            )?;
        }

        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the manifest and print the completion line only if every job was written.
pub async fn run_build(
    service: &AssetBuildService,
    manifest: &Manifest,
    out: &mut impl Write,
) -> Result<BuildReport> {
    let report = service.build(manifest).await?;
    writeln!(out, "{}", COMPLETION_MESSAGE)?;
    Ok(report)
}
