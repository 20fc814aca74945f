//! Test utilities for twlab
//!
//! This crate provides shared testing utilities used across the twlab workspace.

pub mod fixtures;
pub mod mock;

pub use fixtures::{fake_binary_bytes, sha256_hex, sha256sums, write_script};
pub use mock::get_shared_mock_server;

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the crate root
///
/// Keeps test files in one gitignored place that is easy to clean up by hand.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot
/// be created.
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
