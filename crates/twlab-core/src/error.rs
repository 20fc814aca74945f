use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwlabError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to read {path}: {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID: failed to parse {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    #[error("CACHE_DIR_UNAVAILABLE: could not determine a cache directory for this platform")]
    CacheDirUnavailable,

    // Tailwind errors
    #[error("TAILWIND_UNSUPPORTED_PLATFORM: no tailwindcss build for {os}/{arch}")]
    TailwindUnsupportedPlatform { os: String, arch: String },

    #[error("TAILWIND_DOWNLOAD_FAILED: {0}")]
    TailwindDownloadFailed(String),

    #[error("TAILWIND_LAUNCH_FAILED: {0}")]
    TailwindLaunchFailed(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TwlabError>;
