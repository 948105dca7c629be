//! Per-URL download error type.

use thiserror::Error;

/// Why one image could not be downloaded. Only [`FetchError::Storage`] is
/// treated as fatal by the executor; the rest are recorded and reported.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connection, TLS, too many redirects...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Final response status was not 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body bytes do not look like any known image type.
    #[error("downloaded content is not an image")]
    NotAnImage,
    /// Writing the image to the destination directory failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// The record reached the download phase without a local basename.
    #[error("no local filename assigned")]
    Unassigned,
}

impl FetchError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::Storage(_))
    }
}
