//! Fixture builders for provisioning and supervision tests

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Bytes served as a fake tailwindcss release asset.
///
/// A shell script so a provisioned copy can also be spawned on Unix.
pub fn fake_binary_bytes(version: &str) -> Vec<u8> {
    format!("#!/bin/sh\necho 'tailwindcss v{version}'\n").into_bytes()
}

/// Lowercase hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Renders a `sha256sums.txt` body in the release's `<hash>  ./<asset>` layout
pub fn sha256sums(entries: &[(&str, &[u8])]) -> String {
    entries
        .iter()
        .map(|(name, bytes)| format!("{}  ./{}\n", sha256_hex(bytes), name))
        .collect()
}

/// Writes an executable `/bin/sh` script into `dir`.
///
/// Panics on I/O failure; test-only.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to set permissions");
    }

    path
}
