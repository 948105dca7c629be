//! Plan execution: download every filtered-in image, then rewrite documents.
//!
//! All downloads finish before any document is touched, so the rewrite phase
//! sees final `download_successful` and `local_ext` values.

use crate::analyzer::url_dest_regex;
use crate::fetch::{FetchError, Fetcher};
use crate::plan::PlanOptions;
use crate::record::ImageUrlRecord;
use crate::sniff::{normalize_extension, Sniffer};
use crate::storage::{write_file_atomic, PartFile};
use crate::store::UrlRecordStore;
use anyhow::{Context, Result};
use regex::NoExpand;
use std::cmp::Reverse;
use std::fs;
use std::path::Path;

/// External collaborators used during execution.
pub struct Capabilities<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub sniffer: &'a dyn Sniffer,
}

/// Runs both phases. Per-URL failures are recorded on the records; only
/// document I/O and destination-directory write failures are returned.
pub fn execute(
    store: &mut UrlRecordStore,
    options: &PlanOptions,
    caps: &Capabilities<'_>,
) -> Result<()> {
    anyhow::ensure!(
        !options.image_dest_dir.as_os_str().is_empty(),
        "image destination directory is empty"
    );
    download_all(store, &options.image_dest_dir, caps)?;
    rewrite_all(store, &options.markdown_dest_dir)
}

/// Phase 1: download every filtered-in record in ascending URL order.
pub fn download_all(
    store: &mut UrlRecordStore,
    dest_dir: &Path,
    caps: &Capabilities<'_>,
) -> Result<()> {
    for record in store.filtered_mut() {
        match download(record, dest_dir, caps) {
            Ok(()) => {
                record.download_successful = true;
                tracing::info!("saved {} as {}", record.url, record.local_filename());
            }
            Err(e) if e.is_fatal() => {
                return Err(e).with_context(|| {
                    format!("saving {} into {}", record.url, dest_dir.display())
                });
            }
            Err(e) => tracing::error!("failed downloading {}: {}", record.url, e),
        }
    }
    Ok(())
}

/// Downloads one image into `dest_dir`.
///
/// With a known extension the body is streamed straight to disk. Otherwise it
/// is buffered, sniffed to pick the extension, then written.
pub fn download(
    record: &mut ImageUrlRecord,
    dest_dir: &Path,
    caps: &Capabilities<'_>,
) -> Result<(), FetchError> {
    if record.local_basename.is_empty() {
        return Err(FetchError::Unassigned);
    }

    if !record.local_ext.is_empty() {
        tracing::info!("downloading {} by streaming to file", record.url);
        let mut part = PartFile::create(&dest_dir.join(record.local_filename()))?;
        let response = match caps.fetcher.fetch(&record.url, &mut part) {
            Ok(response) => response,
            Err(e) => {
                part.discard();
                return Err(e);
            }
        };
        if response.status != 200 {
            part.discard();
            return Err(FetchError::Http(response.status));
        }
        part.finalize()?;
        return Ok(());
    }

    tracing::info!("downloading {} in memory", record.url);
    let mut body = Vec::new();
    let response = caps.fetcher.fetch(&record.url, &mut body)?;
    if response.status != 200 {
        return Err(FetchError::Http(response.status));
    }
    let kind = caps.sniffer.sniff(&body).ok_or(FetchError::NotAnImage)?;
    record.local_ext = normalize_extension(&kind);
    write_file_atomic(&dest_dir.join(record.local_filename()), &body)?;
    Ok(())
}

/// Phase 2: rewrite each document once, in ascending path order.
pub fn rewrite_all(store: &mut UrlRecordStore, markdown_dest_dir: &str) -> Result<()> {
    for (filepath, mut urls) in store.urls_by_file() {
        tracing::info!("replacing URLs in {}", filepath.display());
        let mut md_source = fs::read_to_string(&filepath)
            .with_context(|| format!("read {}", filepath.display()))?;

        // Longest first, so a URL that is a prefix of another cannot claim part of it.
        urls.sort_by_key(|url| Reverse(url.len()));

        for url in &urls {
            let Some(record) = store.get_mut(url) else {
                continue;
            };
            if !record.download_successful {
                continue;
            }
            let replacement = format!(
                "({})",
                local_reference(markdown_dest_dir, &record.local_filename())
            );
            let Some(occurrence) = record.file_occurrence_mut(&filepath) else {
                continue;
            };
            if occurrence.replacement_unsafe() {
                tracing::warn!(
                    "not replacing {} in {}: {} extra textual occurrence(s)",
                    url,
                    filepath.display(),
                    occurrence.num_extra_textual_occurrences
                );
                continue;
            }
            md_source = url_dest_regex(url)
                .replace_all(&md_source, NoExpand(&replacement))
                .into_owned();
            occurrence.replace_successful = true;
        }

        fs::write(&filepath, md_source).with_context(|| format!("write {}", filepath.display()))?;
    }
    Ok(())
}

/// Joins the Markdown-side directory and the local filename with a single `/`.
pub fn local_reference(markdown_dest_dir: &str, filename: &str) -> String {
    if markdown_dest_dir.is_empty() {
        filename.to_string()
    } else if markdown_dest_dir.ends_with('/') {
        format!("{}{}", markdown_dest_dir, filename)
    } else {
        format!("{}/{}", markdown_dest_dir, filename)
    }
}
