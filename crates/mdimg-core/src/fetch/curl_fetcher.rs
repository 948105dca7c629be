//! [`Fetcher`] backed by the curl crate (libcurl).

use super::{FetchError, FetchResponse, Fetcher};
use crate::config::MdimgConfig;
use std::io::{self, Write};

/// Blocking single-handle GET. Follows redirects, transparently decodes
/// compressed bodies, never retries and sets no overall timeout.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    max_redirections: u32,
    user_agent: Option<String>,
}

impl CurlFetcher {
    pub fn new(max_redirections: u32, user_agent: Option<String>) -> Self {
        Self {
            max_redirections,
            user_agent,
        }
    }

    pub fn from_config(cfg: &MdimgConfig) -> Self {
        Self::new(cfg.max_redirections, cfg.user_agent.clone())
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::from_config(&MdimgConfig::default())
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, body: &mut dyn Write) -> Result<FetchResponse, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirections)?;
        // Empty string: accept every encoding libcurl can decode.
        easy.accept_encoding("")?;
        if let Some(agent) = &self.user_agent {
            easy.useragent(agent)?;
        }

        let mut write_error: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match body.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_error {
            return Err(FetchError::Storage(e));
        }
        performed?;

        let status = easy.response_code()?;
        let content_length = easy
            .content_length_download()
            .ok()
            .filter(|len| *len >= 0.0)
            .map(|len| len as u64);
        tracing::debug!(%url, status, ?content_length, "GET finished");

        Ok(FetchResponse {
            status,
            content_length,
        })
    }
}
