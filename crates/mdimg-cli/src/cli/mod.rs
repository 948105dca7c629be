//! CLI for the Markdown image migrator.

mod commands;

use anyhow::Result;
use clap::Parser;
use mdimg_core::config;
use std::path::PathBuf;

use commands::{run_migrate, MigrateArgs};

/// Download remote images referenced by Markdown files and point the
/// references at the local copies.
///
/// Run with `--dry-run` first to review the plan; back up your documents
/// before a real run.
#[derive(Debug, Parser)]
#[command(name = "mdimg")]
#[command(about = "Migrate remote Markdown images to local files", long_about = None)]
pub struct Cli {
    /// Glob pattern selecting input Markdown files (e.g. '/notes/*/*.md').
    #[arg(long, value_name = "GLOB")]
    pub input_pattern: String,

    /// Only URLs containing at least one of these substrings are migrated (comma separated).
    #[arg(long, value_name = "SUBSTRING", value_delimiter = ',')]
    pub url_substring_filters: Vec<String>,

    /// Directory downloaded images are saved to.
    #[arg(long, value_name = "DIR")]
    pub image_dest_dir: PathBuf,

    /// Directory string written into rewritten references (e.g. '../assets').
    #[arg(long, value_name = "DIR")]
    pub markdown_dest_dir: String,

    /// Where to save the plan report [default: from config].
    #[arg(long, value_name = "PATH")]
    pub plan_summary: Option<PathBuf>,

    /// Where to save the execution report [default: from config].
    #[arg(long, value_name = "PATH")]
    pub execution_summary: Option<PathBuf>,

    /// Print and save the plan only; download nothing and modify no file.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let args = MigrateArgs {
            input_pattern: cli.input_pattern,
            url_substring_filters: cli.url_substring_filters,
            image_dest_dir: cli.image_dest_dir,
            markdown_dest_dir: cli.markdown_dest_dir,
            plan_summary: cli.plan_summary.unwrap_or_else(|| cfg.plan_summary.clone()),
            execution_summary: cli
                .execution_summary
                .unwrap_or_else(|| cfg.execution_summary.clone()),
            dry_run: cli.dry_run,
        };
        run_migrate(&args, &cfg)
    }
}

#[cfg(test)]
mod tests;
