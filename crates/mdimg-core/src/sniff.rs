//! Image type detection from raw bytes.

use image::ImageFormat;

/// Classifies downloaded bytes as an image type, or `None` if not an image.
pub trait Sniffer {
    /// Returns a lowercase type name such as `"png"` or `"jpeg"`.
    fn sniff(&self, bytes: &[u8]) -> Option<String>;
}

/// Magic-byte sniffer using `image::guess_format`. Decoders are not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSniffer;

impl Sniffer for ImageSniffer {
    fn sniff(&self, bytes: &[u8]) -> Option<String> {
        let format = image::guess_format(bytes).ok()?;
        let name = match format {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::WebP => "webp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Ico => "ico",
            other => return other.extensions_str().first().map(|ext| ext.to_string()),
        };
        Some(name.to_string())
    }
}

/// Maps a sniffed type name to the extension written to disk.
pub fn normalize_extension(kind: &str) -> String {
    match kind {
        "jpeg" => "jpg".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";
    const GIF: &[u8] = b"GIF89a\x01\0\x01\0";

    #[test]
    fn sniffs_common_types() {
        let s = ImageSniffer;
        assert_eq!(s.sniff(PNG).as_deref(), Some("png"));
        assert_eq!(s.sniff(JPEG).as_deref(), Some("jpeg"));
        assert_eq!(s.sniff(GIF).as_deref(), Some("gif"));
    }

    #[test]
    fn html_is_not_an_image() {
        assert_eq!(ImageSniffer.sniff(b"<!DOCTYPE html><html></html>"), None);
        assert_eq!(ImageSniffer.sniff(b""), None);
    }

    #[test]
    fn jpeg_normalizes_to_jpg() {
        assert_eq!(normalize_extension("jpeg"), "jpg");
        assert_eq!(normalize_extension("png"), "png");
    }
}
