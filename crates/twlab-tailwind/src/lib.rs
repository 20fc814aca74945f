//! Provisioning of the standalone tailwindcss CLI for twlab.
//!
//! This crate makes sure a given tailwindcss release is present in a local
//! cache and executable, downloading it from the GitHub release assets when
//! it is missing.
//!
//! # Provisioning Flow
//!
//! ```text
//! Provisioner::ensure()
//!     ↓
//! 1. Compute {install_dir}/{version}/{os}-{arch}/tailwindcss
//!     ↓ (file exists → return, no network)
//! 2. Resolve release asset for (os, arch)
//!     → UnsupportedPlatform if unknown (no filesystem writes)
//!     ↓
//! 3. Fetch sha256sums.txt (if verify_checksum)
//!     ↓
//! 4. Stream asset into a temp file next to the target
//!     → verify size and SHA-256
//!     → chmod +x, atomic rename
//! ```
//!
//! # Example
//!
//! ```no_run
//! use twlab_core::ToolOptions;
//! use twlab_tailwind::{Provision, Provisioner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provisioner = Provisioner::new(".");
//! let binary = provisioner.ensure(&ToolOptions::default())?;
//! println!("tailwindcss at {}", binary.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! There is no locking across processes: one provisioner per cache
//! directory at a time is assumed.

pub mod github;
pub mod install;

// Re-export commonly used types
pub use install::{
    Arch, Os, Platform, Provision, ProvisionError, ProvisionStatus, ProvisionedBinary,
    Provisioner,
};
