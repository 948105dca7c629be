//! Per-document occurrence analysis.
//!
//! For every remote image URL in a document, counts structural image
//! references (from the parsed tree) and raw textual occurrences of the
//! parenthesized-URL pattern (from the source text). The difference tells
//! whether a blind textual substitution would touch anything besides images.

use crate::markdown::MarkdownParser;
use crate::url_model::is_remote;
use regex::Regex;
use std::collections::BTreeMap;

/// Occurrence counts of one URL in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceCounts {
    pub image_elements: usize,
    pub textual: usize,
}

impl OccurrenceCounts {
    /// Textual matches not accounted for by image elements. Not clamped: a
    /// negative value means the pattern missed some image references.
    pub fn extra_textual(&self) -> i64 {
        self.textual as i64 - self.image_elements as i64
    }
}

/// Builds the pattern `(` + optional whitespace + URL + optional whitespace + `)`.
pub fn url_dest_regex(url: &str) -> Regex {
    // An escaped literal always yields a valid pattern.
    Regex::new(&format!(r"\(\s*{}\s*\)", regex::escape(url)))
        .unwrap_or_else(|e| unreachable!("escaped URL produced invalid regex: {}", e))
}

/// Counts the textual occurrences of `url` in `text`.
pub fn count_textual(text: &str, url: &str) -> usize {
    url_dest_regex(url).find_iter(text).count()
}

/// Counts image elements per remote URL in a document.
pub fn count_image_elements<P: MarkdownParser + ?Sized>(
    parser: &P,
    text: &str,
) -> BTreeMap<String, usize> {
    let tree = parser.parse(text);
    let mut counts = BTreeMap::new();
    for dest in tree.image_destinations().into_iter().filter(|d| is_remote(d)) {
        *counts.entry(dest.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Analyzes one document: every remote image URL with its occurrence counts.
pub fn analyze<P: MarkdownParser + ?Sized>(
    parser: &P,
    text: &str,
) -> BTreeMap<String, OccurrenceCounts> {
    count_image_elements(parser, text)
        .into_iter()
        .map(|(url, image_elements)| {
            let textual = count_textual(text, &url);
            tracing::debug!(%url, image_elements, textual, "analyzed URL occurrences");
            (
                url,
                OccurrenceCounts {
                    image_elements,
                    textual,
                },
            )
        })
        .collect()
}
