//! Image retrieval.
//!
//! The executor only depends on the [`Fetcher`] trait; [`CurlFetcher`] is the
//! libcurl-backed implementation used by the CLI.

mod curl_fetcher;
mod error;

pub use curl_fetcher::CurlFetcher;
pub use error::FetchError;

use std::io::Write;

/// Outcome of a completed GET. The body has already been written to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchResponse {
    /// Final HTTP status after redirects.
    pub status: u32,
    /// Body size, when the server announced one.
    pub content_length: Option<u64>,
}

/// Performs a GET and streams the response body into `body` as it arrives.
///
/// Non-2xx statuses are not errors at this level; callers inspect
/// [`FetchResponse::status`].
pub trait Fetcher {
    fn fetch(&self, url: &str, body: &mut dyn Write) -> Result<FetchResponse, FetchError>;
}
