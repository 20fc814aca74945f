//! Binary provisioning
//!
//! Downloads the standalone tailwindcss CLI for the current platform into a
//! version-keyed cache directory and marks it executable:
//!
//! - The cache path depends only on (install dir, version, os, arch), so the
//!   same inputs always map to the same file
//! - An existing file at that path is trusted as-is; only its existence is
//!   checked (accepted risk: a tampered cache entry is not detected)
//! - Downloads land in a temp file in the target directory and are renamed
//!   into place, so a partially written binary is never observed
//! - Optional SHA-256 verification against the release's `sha256sums.txt`

use super::checksum::fetch_expected_checksum;
use super::platform::Platform;
use crate::github::{
    DOWNLOAD_TIMEOUT, DownloadError, build_client, download_to_writer, release_asset_url,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use twlab_core::{ToolOptions, TwlabError};

/// Errors raised while provisioning the CLI
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// No release asset exists for this OS/architecture pair
    #[error("no tailwindcss build is published for {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// Options failed validation, e.g. a version that is not a path component
    #[error("invalid tailwind options: {0}")]
    InvalidOptions(#[source] TwlabError),

    /// Cache root could not be resolved
    #[error("could not determine install directory: {0}")]
    InstallDirectory(#[source] TwlabError),

    /// Network or filesystem failure while downloading or installing
    #[error("failed to provision tailwindcss {version} at {}: {source}", path.display())]
    Download {
        version: String,
        path: PathBuf,
        #[source]
        source: DownloadError,
    },
}

impl From<ProvisionError> for TwlabError {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::UnsupportedPlatform { os, arch } => {
                TwlabError::TailwindUnsupportedPlatform { os, arch }
            }
            ProvisionError::InvalidOptions(inner) | ProvisionError::InstallDirectory(inner) => {
                inner
            }
            other @ ProvisionError::Download { .. } => {
                TwlabError::TailwindDownloadFailed(other.to_string())
            }
        }
    }
}

/// A verified, executable tailwindcss binary in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedBinary {
    pub path: PathBuf,
    pub version: String,
    pub platform: Platform,
    /// `true` when this call downloaded the binary, `false` on a cache hit
    pub downloaded: bool,
}

/// Cache state reported without touching the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionStatus {
    pub version: String,
    pub platform: Platform,
    /// `None` when the platform has no release asset
    pub asset: Option<String>,
    pub path: PathBuf,
    pub installed: bool,
}

/// Something that can make a tailwindcss binary available locally
pub trait Provision: Send + Sync {
    fn ensure(&self, options: &ToolOptions) -> Result<ProvisionedBinary, ProvisionError>;

    /// Where `ensure` places the binary; used for diagnostics
    fn target_path(&self, options: &ToolOptions) -> Result<PathBuf, ProvisionError>;
}

/// Downloads tailwindcss release assets into a local cache
#[derive(Debug, Clone)]
pub struct Provisioner {
    platform: Platform,
    content_root: PathBuf,
    timeout: Duration,
}

impl Provisioner {
    /// Provisioner for the current platform; relative install directories
    /// are resolved against `content_root`
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            platform: Platform::current(),
            content_root: content_root.into(),
            timeout: DOWNLOAD_TIMEOUT,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Reports what `ensure` would find, without downloading
    pub fn status(&self, options: &ToolOptions) -> Result<ProvisionStatus, ProvisionError> {
        let path = self.target_path(options)?;

        Ok(ProvisionStatus {
            version: options.normalized_version().to_string(),
            platform: self.platform.clone(),
            asset: self.platform.asset_name().ok(),
            installed: path.is_file(),
            path,
        })
    }

    fn install(
        &self,
        options: &ToolOptions,
        asset: &str,
        target: &Path,
    ) -> Result<(), DownloadError> {
        let version = options.normalized_version();
        let client = build_client(self.timeout).map_err(DownloadError::Client)?;
        let url = release_asset_url(&options.download_base_url, version, asset)?;

        let expected = if options.verify_checksum {
            Some(fetch_expected_checksum(
                &client,
                &options.download_base_url,
                version,
                asset,
            )?)
        } else {
            None
        };

        let target_dir = target.parent().ok_or_else(|| DownloadError::Io {
            operation: format!("get parent directory of {}", target.display()),
            source: std::io::Error::other("no parent directory"),
        })?;

        fs::create_dir_all(target_dir).map_err(|e| DownloadError::Io {
            operation: format!("create install directory {}", target_dir.display()),
            source: e,
        })?;

        // Same directory as the target keeps the final rename on one filesystem.
        // Dropping the temp file on any error below deletes it.
        let mut temp =
            tempfile::NamedTempFile::new_in(target_dir).map_err(|e| DownloadError::Io {
                operation: format!("create temporary file in {}", target_dir.display()),
                source: e,
            })?;

        info!(%url, "Downloading tailwindcss");
        let summary = download_to_writer(&client, &url, temp.as_file_mut())?;
        debug!(bytes = summary.bytes, sha256 = %summary.sha256, "Download complete");

        if let Some(expected) = expected
            && expected != summary.sha256
        {
            return Err(DownloadError::ChecksumMismatch {
                asset: asset.to_string(),
                expected,
                actual: summary.sha256,
            });
        }

        temp.as_file().sync_all().map_err(|e| DownloadError::Io {
            operation: "sync temporary file".to_string(),
            source: e,
        })?;

        #[cfg(unix)]
        set_executable_permissions(temp.path())?;

        // Atomic rename within the install directory
        temp.persist(target).map_err(|e| DownloadError::Io {
            operation: format!("rename temporary file to {}", target.display()),
            source: e.error,
        })?;

        // Sync parent directory on Unix (best-effort, the rename already happened)
        #[cfg(unix)]
        if let Ok(dir) = fs::File::open(target_dir) {
            let _ = dir.sync_all();
        }

        Ok(())
    }
}

impl Provision for Provisioner {
    /// `{install_dir}/{version}/{os}-{arch}/tailwindcss[.exe]`
    fn target_path(&self, options: &ToolOptions) -> Result<PathBuf, ProvisionError> {
        options.validate().map_err(ProvisionError::InvalidOptions)?;

        let install_dir = options
            .install_dir(&self.content_root)
            .map_err(ProvisionError::InstallDirectory)?;

        Ok(install_dir
            .join(options.normalized_version())
            .join(self.platform.cache_key())
            .join(self.platform.binary_name()))
    }

    fn ensure(&self, options: &ToolOptions) -> Result<ProvisionedBinary, ProvisionError> {
        let version = options.normalized_version().to_string();
        let path = self.target_path(options)?;

        if path.is_file() {
            debug!(path = %path.display(), %version, "tailwindcss already provisioned");
            return Ok(ProvisionedBinary {
                path,
                version,
                platform: self.platform.clone(),
                downloaded: false,
            });
        }

        // Resolved before anything touches the filesystem
        let asset = self.platform.asset_name()?;

        info!(
            %version,
            %asset,
            path = %path.display(),
            "tailwindcss not found in cache"
        );

        self.install(options, &asset, &path)
            .map_err(|source| ProvisionError::Download {
                version: version.clone(),
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), %version, "tailwindcss installed");

        Ok(ProvisionedBinary {
            path,
            version,
            platform: self.platform.clone(),
            downloaded: true,
        })
    }
}

/// Sets executable permissions on Unix
#[cfg(unix)]
fn set_executable_permissions(path: &Path) -> Result<(), DownloadError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| DownloadError::Io {
        operation: format!("get metadata for {}", path.display()),
        source: e,
    })?;

    let mut permissions = metadata.permissions();
    let mode = permissions.mode();

    // Add executable bit (owner, group, other)
    permissions.set_mode(mode | 0o111);

    fs::set_permissions(path, permissions).map_err(|e| DownloadError::Io {
        operation: format!("set permissions for {}", path.display()),
        source: e,
    })
}
