//! Global context for CLI commands

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use twlab_core::ToolOptions;

/// Content root and configuration location shared by every command
pub struct Context {
    pub content_root: PathBuf,
    pub config_path: PathBuf,
}

impl Context {
    /// Resolves the content root (default: current directory) and the
    /// configuration file against it
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined
    pub fn new(content_root: Option<&Path>, config: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let content_root = match content_root {
            Some(root) => cwd.join(root),
            None => cwd,
        };
        let config_path = content_root.join(config);

        Ok(Self {
            content_root,
            config_path,
        })
    }

    /// Loads `[tailwind]` options, applying command-line overrides before
    /// validation
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or the
    /// resulting options are invalid
    pub fn load_options<F>(&self, overrides: F) -> Result<ToolOptions>
    where
        F: FnOnce(&mut ToolOptions),
    {
        ToolOptions::load_with(&self.config_path, overrides)
            .with_context(|| format!("Failed to load {}", self.config_path.display()))
    }
}
