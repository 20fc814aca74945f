// Core modules
pub mod config;
pub mod env;
pub mod error;

// Re-export commonly used types
pub use config::{ConfigFile, ToolOptions};
pub use env::HostEnvironment;
pub use error::{Result, TwlabError};
