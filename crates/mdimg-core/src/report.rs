//! Plan and execution-summary rendering as nested Markdown lists.

use crate::record::{FileOccurrenceRecord, ImageUrlRecord};
use crate::store::UrlRecordStore;

/// Prefixes every line that is not whitespace-only.
pub fn indent(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

/// What will be attempted for each (document, URL) pair.
pub fn render_plan(store: &UrlRecordStore) -> String {
    let mut replacement_plan = String::new();
    for (filepath, records) in store.records_by_file() {
        replacement_plan.push_str(&format!("- For file: `{}`\n", filepath.display()));
        for record in records {
            replacement_plan.push_str(&format!("\t- For URL: `{}`\n", record.url));
            let unsafe_here = record
                .file_occurrence(filepath)
                .map_or(true, FileOccurrenceRecord::replacement_unsafe);
            if unsafe_here {
                replacement_plan.push_str("\t\t- Replacement is unsafe, so will not be attempted.\n");
            } else if record.local_ext.is_empty() {
                replacement_plan.push_str(&format!(
                    "\t\t- Replacement will be attempted with local filename `{}` (file extension is not known yet).\n",
                    record.local_filename()
                ));
            } else {
                replacement_plan.push_str(&format!(
                    "\t\t- Replacement will be attempted with local filename `{}`.\n",
                    record.local_filename()
                ));
            }
        }
    }

    if replacement_plan.is_empty() {
        replacement_plan =
            "- No replacements planned. This may be because there are no matching URLs.\n".to_string();
    }
    format!("- URL Replacement Plan\n{}", indent(&replacement_plan, "\t"))
}

/// Download failures and skipped replacements left for manual cleanup.
pub fn render_summary(store: &UrlRecordStore) -> String {
    let mut out = String::new();

    let mut download_summary = String::new();
    for record in store.filtered().filter(|r| !r.download_successful) {
        download_summary.push_str(&format!("- Failed to download URL: `{}`\n", record.url));
        download_summary.push_str("\t- Occurs in files:\n");
        for occurrence in &record.file_occurrences {
            download_summary.push_str(&format!("\t\t- `{}`\n", occurrence.filepath.display()));
        }
    }
    if download_summary.is_empty() {
        download_summary = "- All image downloads succeeded!\n".to_string();
    }
    out.push_str("- Image Download Summary\n");
    out.push_str(&indent(&download_summary, "\t"));

    let mut replacement_summary = String::new();
    for (filepath, records) in store.records_by_file() {
        let mut file_summary = String::new();
        for record in records {
            let Some(occurrence) = record.file_occurrence(filepath) else {
                continue;
            };
            if occurrence.replace_successful {
                continue;
            }
            file_summary.push_str(&format!("\t- Failed to replace URL: `{}`\n", record.url));
            file_summary.push_str(&failure_reason(record, occurrence));
        }
        if !file_summary.is_empty() {
            replacement_summary.push_str(&format!("- For file: `{}`\n", filepath.display()));
            replacement_summary.push_str(&file_summary);
        }
    }
    if replacement_summary.is_empty() {
        replacement_summary = "- All URLs replaced successfully!\n".to_string();
    }
    out.push_str("- URL Replacement Summary\n");
    out.push_str(&indent(&replacement_summary, "\t"));

    out
}

fn failure_reason(record: &ImageUrlRecord, occurrence: &FileOccurrenceRecord) -> String {
    if !record.download_successful {
        return "\t\t- Reason: download failed\n".to_string();
    }
    let extra = occurrence.num_extra_textual_occurrences;
    let reason = if extra > 0 {
        format!(
            "\t\t- Reason: replacement is unsafe because there are {} occurrence(s) of the URL outside an image element\n",
            extra
        )
    } else if extra < 0 {
        format!(
            "\t\t- Reason: replacement is unsafe because {} image element(s) did not match the URL pattern in the source text\n",
            -extra
        )
    } else {
        return String::new();
    };
    format!(
        "{}\t\t- Local image filename: `{}`\n",
        reason,
        record.local_filename()
    )
}
