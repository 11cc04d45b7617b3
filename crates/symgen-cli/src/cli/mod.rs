//! CLI for symgen. Running without arguments regenerates every family.

mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use symgen_core::config::{self, GeneratorConfig};
use symgen_core::{generate, FamilyProgress};

/// Exit status for `--strict` runs with failed icons.
pub const EXIT_PARTIAL_FAILURE: i32 = 2;

/// Top-level CLI for the icon generator.
#[derive(Debug, Parser)]
#[command(name = "symgen")]
#[command(about = "Generate C# icon constants from the Material Symbols catalog", long_about = None)]
pub struct Cli {
    /// Repository root the output directory is resolved against (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Maximum concurrent SVG downloads per family (overrides the config file).
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Exit with status 2 when any icon failed to download.
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    pub async fn run_from_args(timestamp: &str) -> Result<i32> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().context("loading config")?;
        tracing::debug!("loaded config: {:?}", cfg);
        cli.run(cfg, timestamp).await
    }

    /// Applies flag overrides on top of the loaded config.
    pub fn apply_overrides(&self, mut cfg: GeneratorConfig) -> GeneratorConfig {
        if let Some(jobs) = self.jobs {
            cfg.max_concurrent_fetches = jobs;
        }
        cfg
    }

    async fn run(self, cfg: GeneratorConfig, timestamp: &str) -> Result<i32> {
        let cfg = self.apply_overrides(cfg);
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        tracing::info!(root = %root.display(), jobs = cfg.concurrency(), "generation started");

        let (progress_tx, progress_rx) = tokio::sync::mpsc::channel::<FamilyProgress>(16);
        let progress_handle = tokio::spawn(summary::print_progress(progress_rx));

        println!("Start fetching process...");
        let result = generate(&cfg, &root, timestamp, Some(&progress_tx)).await;
        drop(progress_tx);
        if let Err(e) = progress_handle.await {
            tracing::debug!("progress printer ended abnormally: {}", e);
        }

        let report = result.context("icon generation failed")?;
        for line in summary::summary_lines(&report) {
            println!("{}", line);
        }
        tracing::info!(
            fetched = report.total_fetched(),
            failed = report.total_failed(),
            "generation finished"
        );

        if self.strict && !report.is_clean() {
            return Ok(EXIT_PARTIAL_FAILURE);
        }
        Ok(0)
    }
}
