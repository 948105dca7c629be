//! Plan (and unless dry-run, execute) the migration, then write the report.

use anyhow::{Context, Result};
use mdimg_core::config::MdimgConfig;
use mdimg_core::executor::Capabilities;
use mdimg_core::fetch::CurlFetcher;
use mdimg_core::markdown::CmarkParser;
use mdimg_core::naming::NamingContext;
use mdimg_core::plan::{PlanOptions, ReplacementPlan};
use mdimg_core::sniff::ImageSniffer;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved inputs for one run (CLI flags merged with config defaults).
#[derive(Debug, Clone)]
pub struct MigrateArgs {
    pub input_pattern: String,
    pub url_substring_filters: Vec<String>,
    pub image_dest_dir: PathBuf,
    pub markdown_dest_dir: String,
    pub plan_summary: PathBuf,
    pub execution_summary: PathBuf,
    pub dry_run: bool,
}

/// Expands the input glob into file paths sorted by path string.
pub fn expand_input_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries =
        glob::glob(pattern).with_context(|| format!("invalid input pattern: {}", pattern))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.context("failed to read glob match")?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(paths)
}

pub fn run_migrate(args: &MigrateArgs, cfg: &MdimgConfig) -> Result<()> {
    let md_filepaths = expand_input_pattern(&args.input_pattern)?;
    tracing::info!(
        "{} document(s) match {}",
        md_filepaths.len(),
        args.input_pattern
    );

    let options = PlanOptions {
        image_dest_dir: args.image_dest_dir.clone(),
        markdown_dest_dir: args.markdown_dest_dir.clone(),
        url_substring_filters: args
            .url_substring_filters
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect(),
    };
    let mut plan = ReplacementPlan::build(
        &md_filepaths,
        options,
        &CmarkParser::new(),
        NamingContext::now(),
    )?;
    tracing::debug!("plan records:\n{}", plan);

    let plan_report = plan.plan_report();
    write_report(&args.plan_summary, &plan_report)?;

    if args.dry_run {
        println!("{}", plan_report);
        return Ok(());
    }

    let fetcher = CurlFetcher::from_config(cfg);
    let caps = Capabilities {
        fetcher: &fetcher,
        sniffer: &ImageSniffer,
    };
    plan.execute(&caps)?;

    let summary = plan.execution_summary();
    println!("{}", summary);
    write_report(&args.execution_summary, &summary)?;
    Ok(())
}

fn write_report(path: &Path, report: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::write(path, report).with_context(|| format!("write report {}", path.display()))?;
    tracing::info!("report written to {}", path.display());
    Ok(())
}
