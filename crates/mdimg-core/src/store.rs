//! In-memory registry of image URL records for one run.
//!
//! Keyed by URL in a `BTreeMap`, so every iteration is in ascending URL
//! order regardless of the order documents were analyzed in.

use crate::analyzer::OccurrenceCounts;
use crate::record::{FileOccurrenceRecord, ImageUrlRecord};
use crate::url_model::original_filename;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Corpus-wide URL allow-list: a URL passes if it contains any substring
/// (case-sensitive). No substrings means everything passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFilter {
    substrings: Vec<String>,
}

impl UrlFilter {
    pub fn new(substrings: Vec<String>) -> Self {
        Self { substrings }
    }

    pub fn passes(&self, url: &str) -> bool {
        self.substrings.is_empty() || self.substrings.iter().any(|s| url.contains(s.as_str()))
    }
}

#[derive(Debug, Default)]
pub struct UrlRecordStore {
    records: BTreeMap<String, ImageUrlRecord>,
}

impl UrlRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `url` occurs in `filepath`, creating the URL record on
    /// first sight. Call at most once per (URL, document).
    pub fn record_occurrence(
        &mut self,
        url: &str,
        filepath: &Path,
        counts: OccurrenceCounts,
        filter: &UrlFilter,
    ) {
        let record = self.records.entry(url.to_string()).or_insert_with(|| {
            ImageUrlRecord::new(url.to_string(), filter.passes(url), original_filename(url))
        });
        debug_assert!(record.file_occurrence(filepath).is_none());
        record.file_occurrences.push(FileOccurrenceRecord::new(
            filepath.to_path_buf(),
            counts.image_elements,
            counts.extra_textual(),
        ));
    }

    pub fn get(&self, url: &str) -> Option<&ImageUrlRecord> {
        self.records.get(url)
    }

    pub fn get_mut(&mut self, url: &str) -> Option<&mut ImageUrlRecord> {
        self.records.get_mut(url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, filtered-out ones included, in ascending URL order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageUrlRecord> {
        self.records.values()
    }

    /// Records passing the filters, in ascending URL order.
    pub fn filtered(&self) -> impl Iterator<Item = &ImageUrlRecord> {
        self.records.values().filter(|r| r.passes_filters)
    }

    pub fn filtered_mut(&mut self) -> impl Iterator<Item = &mut ImageUrlRecord> {
        self.records.values_mut().filter(|r| r.passes_filters)
    }

    /// Filtered records grouped by document: documents in ascending path
    /// string order (not component order, so `a-b.md` sorts before `a/x.md`),
    /// records within each in ascending URL order.
    pub fn records_by_file(&self) -> Vec<(&Path, Vec<&ImageUrlRecord>)> {
        let mut grouped: BTreeMap<&OsStr, (&Path, Vec<&ImageUrlRecord>)> = BTreeMap::new();
        for record in self.filtered() {
            for occurrence in &record.file_occurrences {
                let path = occurrence.filepath.as_path();
                grouped
                    .entry(path.as_os_str())
                    .or_insert_with(|| (path, Vec::new()))
                    .1
                    .push(record);
            }
        }
        grouped.into_values().collect()
    }

    /// Like [`records_by_file`](Self::records_by_file) but owned URLs, for callers that mutate records.
    pub fn urls_by_file(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.records_by_file()
            .into_iter()
            .map(|(path, records)| {
                (
                    path.to_path_buf(),
                    records.into_iter().map(|r| r.url.clone()).collect(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> OccurrenceCounts {
        OccurrenceCounts {
            image_elements: 1,
            textual: 1,
        }
    }

    #[test]
    fn filter_semantics() {
        let none = UrlFilter::default();
        assert!(none.passes("https://anything/a.png"));

        let f = UrlFilter::new(vec!["firebasestorage".into(), "imgur".into()]);
        assert!(f.passes("https://firebasestorage.googleapis.com/a.png"));
        assert!(f.passes("https://i.imgur.com/a.png"));
        assert!(!f.passes("https://example.com/a.png"));
        assert!(!f.passes("https://FIREBASESTORAGE.googleapis.com/a.png"));
    }

    #[test]
    fn one_record_per_url_one_occurrence_per_document() {
        let mut store = UrlRecordStore::new();
        let filter = UrlFilter::default();
        store.record_occurrence("https://x/a.png", Path::new("b.md"), one(), &filter);
        store.record_occurrence("https://x/a.png", Path::new("a.md"), one(), &filter);
        store.record_occurrence("https://x/b%20c.png", Path::new("a.md"), one(), &filter);

        assert_eq!(store.len(), 2);
        let a = store.get("https://x/a.png").unwrap();
        assert_eq!(a.file_occurrences.len(), 2);
        assert_eq!(a.original_filename, "a.png");
        assert_eq!(store.get("https://x/b%20c.png").unwrap().original_filename, "b c.png");
    }

    #[test]
    fn filter_status_computed_at_creation() {
        let mut store = UrlRecordStore::new();
        let filter = UrlFilter::new(vec!["keep".into()]);
        store.record_occurrence("https://keep/a.png", Path::new("a.md"), one(), &filter);
        store.record_occurrence("https://drop/a.png", Path::new("a.md"), one(), &filter);
        let urls: Vec<_> = store.filtered().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://keep/a.png"]);
        assert_eq!(store.iter().count(), 2);
    }

    #[test]
    fn grouping_is_sorted_by_path_then_url() {
        let mut store = UrlRecordStore::new();
        let filter = UrlFilter::default();
        store.record_occurrence("https://x/z.png", Path::new("z.md"), one(), &filter);
        store.record_occurrence("https://x/b.png", Path::new("z.md"), one(), &filter);
        store.record_occurrence("https://x/a.png", Path::new("a.md"), one(), &filter);
        store.record_occurrence("https://x/b.png", Path::new("a.md"), one(), &filter);

        let grouped = store.urls_by_file();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, PathBuf::from("a.md"));
        assert_eq!(grouped[0].1, vec!["https://x/a.png", "https://x/b.png"]);
        assert_eq!(grouped[1].0, PathBuf::from("z.md"));
        assert_eq!(grouped[1].1, vec!["https://x/b.png", "https://x/z.png"]);
    }

    #[test]
    fn grouping_sorts_by_path_string() {
        let mut store = UrlRecordStore::new();
        let filter = UrlFilter::default();
        store.record_occurrence("https://x/a.png", Path::new("/notes/a/x.md"), one(), &filter);
        store.record_occurrence("https://x/a.png", Path::new("/notes/a-b.md"), one(), &filter);

        let paths: Vec<_> = store.records_by_file().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec![Path::new("/notes/a-b.md"), Path::new("/notes/a/x.md")]);
    }

    #[test]
    fn extra_occurrences_carried_into_record() {
        let mut store = UrlRecordStore::new();
        let counts = OccurrenceCounts {
            image_elements: 1,
            textual: 3,
        };
        store.record_occurrence("https://x/a.png", Path::new("a.md"), counts, &UrlFilter::default());
        let occ = &store.get("https://x/a.png").unwrap().file_occurrences[0];
        assert_eq!(occ.num_extra_textual_occurrences, 2);
        assert!(occ.replacement_unsafe());
    }
}
