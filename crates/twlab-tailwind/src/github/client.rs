//! HTTP client construction for GitHub interactions

use reqwest::blocking::Client;
use std::time::Duration;

/// Timeout for release downloads (5 minutes; the CLI is a large single binary)
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("twlab/", env!("CARGO_PKG_VERSION"));

/// Builds HTTP client with appropriate settings for GitHub
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
