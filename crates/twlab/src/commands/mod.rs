//! CLI command implementations

pub mod install;
pub mod status;
pub mod watch;
