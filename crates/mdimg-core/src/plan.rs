//! Replacement planning: analyze every document, register URLs, assign names.

use crate::analyzer::analyze;
use crate::executor::{self, Capabilities};
use crate::markdown::MarkdownParser;
use crate::naming::{FilenameUniquifier, NamingContext};
use crate::report;
use crate::store::{UrlFilter, UrlRecordStore};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs that shape a plan besides the documents themselves.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Directory downloaded images are saved to.
    pub image_dest_dir: PathBuf,
    /// Directory string written into rewritten references, e.g. `../assets`.
    pub markdown_dest_dir: String,
    /// Substring allow-list; empty means every URL is eligible.
    pub url_substring_filters: Vec<String>,
}

/// Planned downloads and substitutions over a set of documents.
#[derive(Debug)]
pub struct ReplacementPlan {
    options: PlanOptions,
    store: UrlRecordStore,
}

impl ReplacementPlan {
    /// Analyzes `md_filepaths` and assigns a unique local name to every
    /// filtered-in URL. Reads each document once and lists the destination
    /// directory once; any I/O failure is fatal.
    pub fn build<P: MarkdownParser + ?Sized>(
        md_filepaths: &[PathBuf],
        options: PlanOptions,
        parser: &P,
        naming: NamingContext,
    ) -> Result<Self> {
        anyhow::ensure!(
            !options.image_dest_dir.as_os_str().is_empty(),
            "image destination directory is empty"
        );

        let filter = UrlFilter::new(options.url_substring_filters.clone());
        let mut store = UrlRecordStore::new();
        let mut seen: HashSet<&Path> = HashSet::new();

        for filepath in md_filepaths {
            if !seen.insert(filepath.as_path()) {
                continue;
            }
            let md_source = fs::read_to_string(filepath)
                .with_context(|| format!("read {}", filepath.display()))?;
            let occurrences = analyze(parser, &md_source);
            tracing::debug!(
                "{}: {} remote image URL(s)",
                filepath.display(),
                occurrences.len()
            );
            for (url, counts) in occurrences {
                store.record_occurrence(&url, filepath, counts, &filter);
            }
        }

        let existing = list_dir_names(&options.image_dest_dir)?;
        let mut uniquifier = FilenameUniquifier::new(naming, existing);
        for record in store.filtered_mut() {
            let (basename, ext) = uniquifier.assign(&record.original_filename);
            record.local_basename = basename;
            record.local_ext = ext;
        }

        tracing::info!(
            "planned {} of {} image URL(s) across {} document(s)",
            store.filtered().count(),
            store.len(),
            seen.len()
        );

        Ok(Self { options, store })
    }

    pub fn store(&self) -> &UrlRecordStore {
        &self.store
    }

    /// Downloads images and rewrites documents. See [`executor::execute`].
    pub fn execute(&mut self, caps: &Capabilities<'_>) -> Result<()> {
        executor::execute(&mut self.store, &self.options, caps)
    }

    /// Human-readable description of the planned substitutions.
    pub fn plan_report(&self) -> String {
        report::render_plan(&self.store)
    }

    /// Human-readable list of what still needs manual cleanup after `execute`.
    pub fn execution_summary(&self) -> String {
        report::render_summary(&self.store)
    }
}

fn list_dir_names(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list {}", dir.display()))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Indented dump of every filtered-in record with its per-document counts.
impl fmt::Display for ReplacementPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (filepath, records) in self.store.records_by_file() {
            writeln!(f, "---\nfilepath: {}", filepath.display())?;
            for record in records {
                let mut block = format!("\n{}", record);
                if let Some(occurrence) = record.file_occurrence(filepath) {
                    block.push_str(&occurrence.to_string());
                }
                f.write_str(&report::indent(&block, "\t"))?;
            }
        }
        Ok(())
    }
}
