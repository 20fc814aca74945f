//! Generic download functionality for GitHub resources

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use thiserror::Error;
use url::Url;

/// Outcome of a streamed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Bytes written to the sink
    pub bytes: u64,
    /// Lowercase hex SHA-256 of the written bytes
    pub sha256: String,
}

/// Downloads from URL to memory
///
/// Used for small release metadata such as `sha256sums.txt`.
///
/// # Errors
///
/// Returns error if the request fails, the status is not success, or the
/// body cannot be read
pub fn download_to_memory(client: &Client, url: &Url) -> Result<Vec<u8>, DownloadError> {
    let mut buffer = Vec::new();
    download_to_writer(client, url, &mut buffer)?;
    Ok(buffer)
}

/// Streams a download into `sink`, hashing as it goes
///
/// When the server announces a `Content-Length`, the number of bytes
/// received must match it.
///
/// # Errors
///
/// Returns error if:
/// - HTTP request fails
/// - Response status is not success
/// - Size mismatch against `Content-Length`
/// - I/O error while reading the body or writing the sink
pub fn download_to_writer<W: Write>(
    client: &Client,
    url: &Url,
    sink: &mut W,
) -> Result<DownloadSummary, DownloadError> {
    // Send GET request
    let mut response = client
        .get(url.as_str())
        .send()
        .map_err(|e| DownloadError::Http {
            url: url.clone(),
            source: e,
        })?;

    // Check status and convert to error without unwrap
    if let Err(err) = response.error_for_status_ref() {
        return Err(DownloadError::Http {
            url: url.clone(),
            source: err.without_url(),
        });
    }

    let content_length = response.content_length();

    let mut hasher = Sha256::new();
    let mut downloaded: u64 = 0;
    let mut chunk = [0; 8192];

    loop {
        let bytes_read = response.read(&mut chunk).map_err(|e| DownloadError::Io {
            operation: format!("read response body from {}", url),
            source: e,
        })?;

        if bytes_read == 0 {
            break;
        }

        sink.write_all(&chunk[..bytes_read])
            .map_err(|e| DownloadError::Io {
                operation: "write downloaded bytes".to_string(),
                source: e,
            })?;

        hasher.update(&chunk[..bytes_read]);
        downloaded += bytes_read as u64;
    }

    sink.flush().map_err(|e| DownloadError::Io {
        operation: "flush downloaded bytes".to_string(),
        source: e,
    })?;

    // Verify size if announced
    if let Some(expected) = content_length
        && downloaded != expected
    {
        return Err(DownloadError::SizeMismatch {
            url: url.clone(),
            expected,
            actual: downloaded,
        });
    }

    Ok(DownloadSummary {
        bytes: downloaded,
        sha256: format!("{:x}", hasher.finalize()),
    })
}

/// Download error types
#[derive(Debug, Error)]
pub enum DownloadError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// HTTP error during download
    #[error("HTTP error downloading {url}: {source}")]
    Http {
        /// URL that failed
        url: Url,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// Downloaded size does not match Content-Length
    #[error("size mismatch for {url}: expected {expected} bytes, got {actual} bytes")]
    SizeMismatch {
        url: Url,
        expected: u64,
        actual: u64,
    },

    /// Filesystem or stream failure
    #[error("I/O error during {operation}: {source}")]
    Io {
        /// What was being done
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Digest differs from the release's published checksum
    #[error("checksum mismatch for {asset}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        asset: String,
        expected: String,
        actual: String,
    },

    /// Release checksum file has no entry for the asset
    #[error("{asset} is not listed in {url}")]
    ChecksumNotListed { asset: String, url: Url },

    /// Asset URL could not be built
    #[error(transparent)]
    Url(#[from] super::url::UrlError),
}
