//! Filename extraction from URL path.

use super::decode::percent_decode;

/// Returns the percent-decoded basename of a URL's path.
///
/// The path is decoded before splitting, so an encoded object key such as
/// `o/imgs%2Fuser%2Fa.png` yields `a.png`. Query and fragment never
/// contribute. Returns an empty string for a path ending in `/` or an
/// unparseable URL.
pub fn original_filename(url: &str) -> String {
    let parsed = match url::Url::parse(url) {
        Ok(u) => u,
        Err(_) => return String::new(),
    };
    let decoded = percent_decode(parsed.path());
    match decoded.rsplit_once('/') {
        Some((_, name)) => name.to_string(),
        None => decoded,
    }
}

/// Splits a filename into `(root, extension)`, the extension without its dot.
///
/// Leading dots belong to the root, so `.hidden` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let body_start = name.len() - name.trim_start_matches('.').len();
    match name[body_start..].rfind('.') {
        Some(i) => {
            let dot = body_start + i;
            (&name[..dot], &name[dot + 1..])
        }
        None => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(original_filename("https://example.com/a/b/photo.jpg"), "photo.jpg");
        assert_eq!(original_filename("https://example.com/single"), "single");
    }

    #[test]
    fn decodes_before_taking_basename() {
        assert_eq!(
            original_filename(
                "https://firebasestorage.googleapis.com/v0/b/app/o/imgs%2Fuser%2Fmy%20pic.png?alt=media&token=1"
            ),
            "my pic.png"
        );
    }

    #[test]
    fn root_or_unparseable() {
        assert_eq!(original_filename("https://example.com/"), "");
        assert_eq!(original_filename("https://example.com"), "");
        assert_eq!(original_filename("not a url"), "");
    }

    #[test]
    fn with_query() {
        assert_eq!(original_filename("https://example.com/file.png?size=2"), "file.png");
    }

    #[test]
    fn split_extension_cases() {
        assert_eq!(split_extension("photo.jpg"), ("photo", "jpg"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", "gz"));
        assert_eq!(split_extension("photo"), ("photo", ""));
        assert_eq!(split_extension(".hidden"), (".hidden", ""));
        assert_eq!(split_extension("..a.png"), ("..a", "png"));
        assert_eq!(split_extension("trailing."), ("trailing", ""));
        assert_eq!(split_extension(""), ("", ""));
    }
}
