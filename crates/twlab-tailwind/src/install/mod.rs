pub mod checksum;
pub mod platform;
pub mod provision;

// Re-export for convenience
pub use platform::{Arch, Os, Platform, asset_name};
pub use provision::{Provision, ProvisionError, ProvisionStatus, ProvisionedBinary, Provisioner};
