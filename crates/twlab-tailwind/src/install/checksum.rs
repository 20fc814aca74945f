//! Release checksum lookup
//!
//! Each tailwindcss release ships `sha256sums.txt` with one
//! `<sha256>  ./<asset>` line per standalone build.

use crate::github::{DownloadError, download_to_memory, release_asset_url};
use reqwest::blocking::Client;

/// Name of the checksum asset published with every release
pub const CHECKSUMS_ASSET: &str = "sha256sums.txt";

/// Finds the lowercase hex digest listed for `asset`
pub fn find_checksum(body: &str, asset: &str) -> Option<String> {
    body.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        let hash = fields.next()?;
        let name = fields.next()?;
        let name = name.trim_start_matches('*').trim_start_matches("./");

        (name == asset && is_sha256_hex(hash)).then(|| hash.to_ascii_lowercase())
    })
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Downloads the release checksum file and returns the digest for `asset`
pub fn fetch_expected_checksum(
    client: &Client,
    base_url: &str,
    version: &str,
    asset: &str,
) -> Result<String, DownloadError> {
    let url = release_asset_url(base_url, version, CHECKSUMS_ASSET)?;
    let body = download_to_memory(client, &url)?;
    let body = String::from_utf8_lossy(&body);

    find_checksum(&body, asset).ok_or_else(|| DownloadError::ChecksumNotListed {
        asset: asset.to_string(),
        url,
    })
}
