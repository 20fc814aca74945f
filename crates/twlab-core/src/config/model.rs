use super::consts;
use crate::error::{Result, TwlabError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// twlab.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub tailwind: ToolOptions,
}

/// Options for provisioning and running the tailwindcss CLI.
///
/// Read once at startup; consumers receive it by value or shared reference
/// and never mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOptions {
    /// Release to provision, with or without a leading `v`
    #[serde(default = "default_version")]
    pub version: String,

    /// Cache root for downloaded binaries. Relative paths are taken from the
    /// content root; `None` selects the OS cache directory.
    #[serde(default)]
    pub install_directory: Option<PathBuf>,

    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,

    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Passed through after `--watch`
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Mirror serving `tailwindlabs/tailwindcss/releases/download/...`
    #[serde(default = "default_download_base_url")]
    pub download_base_url: String,

    /// Check downloads against the release's `sha256sums.txt`
    #[serde(default = "default_verify_checksum")]
    pub verify_checksum: bool,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            version: default_version(),
            install_directory: None,
            input_file: default_input_file(),
            output_file: default_output_file(),
            extra_args: Vec::new(),
            download_base_url: default_download_base_url(),
            verify_checksum: default_verify_checksum(),
        }
    }
}

fn default_version() -> String {
    consts::DEFAULT_VERSION.to_string()
}

fn default_input_file() -> PathBuf {
    PathBuf::from(consts::DEFAULT_INPUT_FILE)
}

fn default_output_file() -> PathBuf {
    PathBuf::from(consts::DEFAULT_OUTPUT_FILE)
}

fn default_download_base_url() -> String {
    consts::DEFAULT_DOWNLOAD_BASE_URL.to_string()
}

fn default_verify_checksum() -> bool {
    true
}

impl ToolOptions {
    /// Reads the `[tailwind]` table from `path`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, |_| {})
    }

    /// Reads the `[tailwind]` table, then applies `configure` before validating.
    pub fn load_with<F>(path: impl AsRef<Path>, configure: F) -> Result<Self>
    where
        F: FnOnce(&mut ToolOptions),
    {
        let path = path.as_ref();

        let mut options = if path.exists() {
            ConfigFile::from_file(path)?.tailwind
        } else {
            ToolOptions::default()
        };

        configure(&mut options);
        options.validate()?;

        Ok(options)
    }

    /// Checks the values the provisioner and supervisor rely on
    pub fn validate(&self) -> Result<()> {
        let version = self.version.trim();
        if version.is_empty() || version == "v" {
            return Err(TwlabError::ConfigInvalidValue {
                field: "tailwind.version".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        // Becomes a cache path component, so `.`/`..` and separators are out
        let starts_with_digit = self
            .normalized_version()
            .starts_with(|c: char| c.is_ascii_digit());
        if !starts_with_digit
            || version.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\')
        {
            return Err(TwlabError::ConfigInvalidValue {
                field: "tailwind.version".to_string(),
                reason: format!("'{}' is not a release version", self.version),
            });
        }

        if self.input_file.as_os_str().is_empty() {
            return Err(TwlabError::ConfigInvalidValue {
                field: "tailwind.input_file".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.output_file.as_os_str().is_empty() {
            return Err(TwlabError::ConfigInvalidValue {
                field: "tailwind.output_file".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let base = url::Url::parse(&self.download_base_url).map_err(|e| {
            TwlabError::ConfigInvalidValue {
                field: "tailwind.download_base_url".to_string(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(TwlabError::ConfigInvalidValue {
                field: "tailwind.download_base_url".to_string(),
                reason: format!("unsupported scheme '{}'", base.scheme()),
            });
        }

        Ok(())
    }

    /// Version without a leading `v`, used for cache paths and release tags
    pub fn normalized_version(&self) -> &str {
        let version = self.version.trim();
        version.strip_prefix('v').unwrap_or(version)
    }

    /// Cache root for downloaded binaries.
    ///
    /// Relative `install_directory` values are joined onto `content_root`.
    pub fn install_dir(&self, content_root: &Path) -> Result<PathBuf> {
        match &self.install_directory {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => Ok(content_root.join(dir)),
            None => {
                let base = dirs::cache_dir().ok_or(TwlabError::CacheDirUnavailable)?;
                Ok(consts::CACHE_SUBDIRS
                    .iter()
                    .fold(base, |acc, part| acc.join(part)))
            }
        }
    }
}

impl ConfigFile {
    /// Reads and parses a twlab.toml file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| TwlabError::ConfigParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        toml::from_str(&content).map_err(|e| TwlabError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config.tailwind, ToolOptions::default());
        assert_eq!(config.tailwind.version, consts::DEFAULT_VERSION);
        assert!(config.tailwind.verify_checksum);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[tailwind]
version = "v4.0.0"
install_directory = ".twlab/bin"
input_file = "assets/site.css"
output_file = "public/css/site.css"
extra_args = ["--minify"]
download_base_url = "https://mirror.example.com"
verify_checksum = false
"#;
        let config: ConfigFile = toml::from_str(toml).unwrap();
        let options = config.tailwind;
        assert_eq!(options.version, "v4.0.0");
        assert_eq!(options.normalized_version(), "4.0.0");
        assert_eq!(options.install_directory, Some(PathBuf::from(".twlab/bin")));
        assert_eq!(options.input_file, PathBuf::from("assets/site.css"));
        assert_eq!(options.output_file, PathBuf::from("public/css/site.css"));
        assert_eq!(options.extra_args, vec!["--minify".to_string()]);
        assert_eq!(options.download_base_url, "https://mirror.example.com");
        assert!(!options.verify_checksum);
    }

    #[test]
    fn test_validate_rejects_empty_version() {
        let options = ToolOptions {
            version: "  ".to_string(),
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("tailwind.version"));
    }

    #[test]
    fn test_validate_rejects_path_like_version() {
        let options = ToolOptions {
            version: "../4.0.0".to_string(),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_dot_versions() {
        for version in [".", "..", "v..", "...", "latest"] {
            let options = ToolOptions {
                version: version.to_string(),
                ..Default::default()
            };
            let err = options.validate().unwrap_err();
            assert!(
                err.to_string().contains("tailwind.version"),
                "{version} accepted"
            );
        }
    }

    #[test]
    fn test_validate_accepts_prefixed_and_prerelease_versions() {
        for version in ["4.1.18", "v4.1.18", "v4.0.0-beta.8"] {
            let options = ToolOptions {
                version: version.to_string(),
                ..Default::default()
            };
            assert!(options.validate().is_ok(), "{version} rejected");
        }
    }

    #[test]
    fn test_validate_rejects_non_http_mirror() {
        let options = ToolOptions {
            download_base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("download_base_url"));
    }

    #[test]
    fn test_install_dir_relative_to_content_root() {
        let options = ToolOptions {
            install_directory: Some(PathBuf::from(".twlab/bin")),
            ..Default::default()
        };
        let dir = options.install_dir(Path::new("/srv/site")).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/site/.twlab/bin"));
    }

    #[test]
    fn test_install_dir_defaults_to_os_cache() {
        let options = ToolOptions::default();
        if let Ok(dir) = options.install_dir(Path::new("/srv/site")) {
            assert!(dir.ends_with("twlab/tailwindcss"));
        }
    }
}
