//! Shared GitHub interaction utilities
//!
//! - HTTP client construction with user-agent and timeouts
//! - Streaming downloads with size and SHA-256 tracking
//! - Release asset URL construction

pub mod client;
pub mod download;
pub mod url;

// Re-exports for convenient access
pub use client::{DOWNLOAD_TIMEOUT, USER_AGENT, build_client};
pub use download::{DownloadError, DownloadSummary, download_to_memory, download_to_writer};
pub use url::{UrlError, release_asset_url};
