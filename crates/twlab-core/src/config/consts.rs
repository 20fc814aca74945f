//! Defaults shared by the configuration loader and the CLI

/// Name of the project configuration file, looked up in the content root
pub const CONFIG_FILE_NAME: &str = "twlab.toml";

/// Release of the standalone tailwindcss CLI provisioned when none is configured
pub const DEFAULT_VERSION: &str = "4.1.18";

/// Source stylesheet, relative to the content root
pub const DEFAULT_INPUT_FILE: &str = "styles/app.css";

/// Generated stylesheet, relative to the content root
pub const DEFAULT_OUTPUT_FILE: &str = "dist/app.css";

/// Host serving `tailwindlabs/tailwindcss` release assets
pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://github.com";

/// Subdirectories of the OS cache dir used when `install_directory` is unset
pub const CACHE_SUBDIRS: [&str; 2] = ["twlab", "tailwindcss"];
