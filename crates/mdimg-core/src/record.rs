//! Per-URL and per-(URL, document) records.

use std::fmt;
use std::path::{Path, PathBuf};

/// Occurrences of one URL in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOccurrenceRecord {
    pub filepath: PathBuf,
    /// Image elements referencing the URL.
    pub num_image_elements: usize,
    /// Textual matches of the URL pattern minus `num_image_elements`; may be negative.
    pub num_extra_textual_occurrences: i64,
    /// Set once the substitution has been written into the document text.
    pub replace_successful: bool,
}

impl FileOccurrenceRecord {
    pub fn new(filepath: PathBuf, num_image_elements: usize, num_extra_textual_occurrences: i64) -> Self {
        Self {
            filepath,
            num_image_elements,
            num_extra_textual_occurrences,
            replace_successful: false,
        }
    }

    /// Replacement is safe only when the pattern matches exactly the image
    /// elements. Extra matches would rewrite unrelated text; missing matches
    /// mean the pattern disagrees with the parser, so neither is trusted.
    pub fn replacement_unsafe(&self) -> bool {
        self.num_extra_textual_occurrences != 0
    }
}

impl fmt::Display for FileOccurrenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "filepath: {}", self.filepath.display())?;
        writeln!(f, "num_image_elements: {}", self.num_image_elements)?;
        writeln!(
            f,
            "num_extra_textual_occurrences: {}",
            self.num_extra_textual_occurrences
        )
    }
}

/// Everything known about one distinct remote image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlRecord {
    pub url: String,
    pub passes_filters: bool,
    /// Percent-decoded basename of the URL path.
    pub original_filename: String,
    pub local_basename: String,
    /// Without the dot; empty until known.
    pub local_ext: String,
    pub download_successful: bool,
    pub file_occurrences: Vec<FileOccurrenceRecord>,
}

impl ImageUrlRecord {
    pub fn new(url: String, passes_filters: bool, original_filename: String) -> Self {
        Self {
            url,
            passes_filters,
            original_filename,
            local_basename: String::new(),
            local_ext: String::new(),
            download_successful: false,
            file_occurrences: Vec::new(),
        }
    }

    /// `<basename>.<ext>`, or just the basename while the extension is unknown.
    pub fn local_filename(&self) -> String {
        if self.local_ext.is_empty() {
            self.local_basename.clone()
        } else {
            format!("{}.{}", self.local_basename, self.local_ext)
        }
    }

    pub fn file_occurrence(&self, filepath: &Path) -> Option<&FileOccurrenceRecord> {
        self.file_occurrences.iter().find(|o| o.filepath == filepath)
    }

    pub fn file_occurrence_mut(&mut self, filepath: &Path) -> Option<&mut FileOccurrenceRecord> {
        self.file_occurrences
            .iter_mut()
            .find(|o| o.filepath == filepath)
    }
}

impl fmt::Display for ImageUrlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "url: {}", self.url)?;
        writeln!(f, "passes_filters: {}", self.passes_filters)?;
        writeln!(f, "original_filename: {}", self.original_filename)?;
        writeln!(f, "local_basename: {}", self.local_basename)?;
        writeln!(f, "local_ext: {}", self.local_ext)
    }
}
