//! URL modeling and filename derivation.
//!
//! Classifies image destinations as remote or not and derives the original
//! filename (percent-decoded last path segment) used as the naming hint.

mod decode;
mod path;

pub use decode::percent_decode;
pub use path::{original_filename, split_extension};

/// Returns true if an image destination is an HTTP(S) URL.
///
/// Relative paths, `data:` URIs and other schemes are left alone.
pub fn is_remote(dest: &str) -> bool {
    has_prefix_ignore_case(dest, "http://") || has_prefix_ignore_case(dest, "https://")
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_schemes() {
        assert!(is_remote("https://img.example/a.jpg"));
        assert!(is_remote("http://img.example/a.jpg"));
        assert!(is_remote("HTTPS://img.example/a.jpg"));
    }

    #[test]
    fn non_remote_destinations() {
        assert!(!is_remote("../assets/a.jpg"));
        assert!(!is_remote("data:image/png;base64,AAAA"));
        assert!(!is_remote("ftp://img.example/a.jpg"));
        assert!(!is_remote("httpfoo"));
        assert!(!is_remote(""));
    }
}
