//! URL construction helpers for tailwindcss release assets

use thiserror::Error;
use url::Url;

/// Repository publishing the standalone CLI builds
pub const RELEASE_REPOSITORY: [&str; 2] = ["tailwindlabs", "tailwindcss"];

/// Builds `{base}/tailwindlabs/tailwindcss/releases/download/v{version}/{asset}`
///
/// Any path already present on `base` is kept as a prefix, so mirrors
/// hosted under a subpath work.
///
/// # Errors
///
/// Returns error if `base` does not parse or cannot be a base URL
pub fn release_asset_url(base: &str, version: &str, asset: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(base)?;
    let tag = format!("v{}", version);

    let url_for_error = url.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase { url: url_for_error })?
        .pop_if_empty()
        .extend(RELEASE_REPOSITORY)
        .extend(["releases", "download", tag.as_str(), asset]);

    Ok(url)
}

/// URL construction errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// URL cannot be used as a base
    #[error("URL cannot be a base: {url}")]
    CannotBeABase {
        /// The problematic URL
        url: Url,
    },

    /// Invalid URL parse error
    #[error("Invalid URL: {0}")]
    ParseError(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_asset_url_github() {
        let url = release_asset_url("https://github.com", "4.1.18", "tailwindcss-linux-x64").unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/tailwindlabs/tailwindcss/releases/download/v4.1.18/tailwindcss-linux-x64"
        );
    }

    #[test]
    fn test_release_asset_url_keeps_mirror_prefix() {
        let url =
            release_asset_url("https://mirror.example.com/gh/", "4.0.0", "sha256sums.txt").unwrap();
        assert_eq!(
            url.as_str(),
            "https://mirror.example.com/gh/tailwindlabs/tailwindcss/releases/download/v4.0.0/sha256sums.txt"
        );
    }

    #[test]
    fn test_release_asset_url_rejects_garbage() {
        assert!(matches!(
            release_asset_url("not a url", "4.0.0", "x"),
            Err(UrlError::ParseError(_))
        ));
        assert!(matches!(
            release_asset_url("mailto:someone@example.com", "4.0.0", "x"),
            Err(UrlError::CannotBeABase { .. })
        ));
    }
}
