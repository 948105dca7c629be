//! Collision-free local filename assignment.
//!
//! Names are assigned before the real file type is known, so uniqueness is
//! decided on the root only: `a.jpg` and `a.png` collide. Each run stamps
//! names with the timestamp held by its [`NamingContext`], which makes
//! output differ between runs but stay comparable within one.

use crate::url_model::split_extension;
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-run naming state. Create once per run and pass it to every uniquifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingContext {
    timestamp: u64,
}

impl NamingContext {
    /// Captures the current Unix time in seconds.
    pub fn now() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self { timestamp }
    }

    /// Fixed timestamp, for reproducible names in tests.
    pub fn fixed(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

/// Assigns unique filename roots against a growing set of claimed roots.
#[derive(Debug)]
pub struct FilenameUniquifier {
    ctx: NamingContext,
    claimed: HashSet<String>,
}

impl FilenameUniquifier {
    /// Seeds the claimed set from existing filenames (extensions stripped).
    pub fn new<I, S>(ctx: NamingContext, existing_filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let claimed = existing_filenames
            .into_iter()
            .map(|name| split_extension(name.as_ref()).0.to_string())
            .collect();
        Self { ctx, claimed }
    }

    /// Returns `(root, ext)` for `desired` and claims the root.
    ///
    /// Root is `<desired root, spaces as '_'>_<timestamp>_<n>` with the
    /// smallest `n >= 0` not yet claimed. The extension is returned as is,
    /// without its dot, and may be empty.
    pub fn assign(&mut self, desired: &str) -> (String, String) {
        let (root, ext) = split_extension(desired);
        let stem = format!("{}_{}", root.replace(' ', "_"), self.ctx.timestamp);

        let mut suffix: u64 = 0;
        let candidate = loop {
            let candidate = format!("{}_{}", stem, suffix);
            if !self.claimed.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        self.claimed.insert(candidate.clone());
        (candidate, ext.to_string())
    }
}
