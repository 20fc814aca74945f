//! Host environment gate
//!
//! Watch mode only runs in a development session. The host decides what
//! "development" means by naming its environment; the content root anchors
//! every relative path the tool sees.

use std::path::{Path, PathBuf};

/// Environment name that enables provisioning and supervision
pub const DEVELOPMENT: &str = "Development";

/// Environment variable consulted by [`HostEnvironment::from_env`]
pub const ENVIRONMENT_VAR: &str = "TWLAB_ENV";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    name: String,
    content_root: PathBuf,
}

impl HostEnvironment {
    pub fn new(name: impl Into<String>, content_root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            content_root: content_root.into(),
        }
    }

    pub fn development(content_root: impl Into<PathBuf>) -> Self {
        Self::new(DEVELOPMENT, content_root)
    }

    /// Reads the environment name from `TWLAB_ENV`, defaulting to development
    pub fn from_env(content_root: impl Into<PathBuf>) -> Self {
        let name = std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| DEVELOPMENT.to_string());
        Self::new(name, content_root)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Case-insensitive match against [`DEVELOPMENT`]
    pub fn is_development(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(DEVELOPMENT)
    }
}
