use super::provision::ProvisionError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOS,
    Linux,
    Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm64,
}

impl Os {
    /// Accepts Rust's `std::env::consts::OS` names plus `darwin`
    pub fn parse(name: &str) -> Option<Os> {
        match name {
            "macos" | "darwin" => Some(Os::MacOS),
            "linux" => Some(Os::Linux),
            "windows" => Some(Os::Windows),
            _ => None,
        }
    }

    /// Segment used in release asset names
    fn asset_segment(self) -> &'static str {
        match self {
            Os::MacOS => "macos",
            Os::Linux => "linux",
            Os::Windows => "windows",
        }
    }
}

impl Arch {
    /// Accepts Rust's `std::env::consts::ARCH` names plus common aliases
    pub fn parse(name: &str) -> Option<Arch> {
        match name {
            "x86_64" | "x64" | "amd64" => Some(Arch::X64),
            "aarch64" | "arm64" => Some(Arch::Arm64),
            _ => None,
        }
    }

    fn asset_segment(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

/// Operating system and CPU architecture a binary is provisioned for.
///
/// Holds the raw identifiers so the cache path can be computed even for
/// pairs that have no release asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    os: String,
    arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this process was compiled for
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Cache directory component, e.g. `linux-x86_64`
    pub fn cache_key(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }

    /// Resolves the pair against the known release matrix
    pub fn target(&self) -> Result<(Os, Arch), ProvisionError> {
        match (Os::parse(&self.os), Arch::parse(&self.arch)) {
            (Some(os), Some(arch)) => Ok((os, arch)),
            _ => Err(ProvisionError::UnsupportedPlatform {
                os: self.os.clone(),
                arch: self.arch.clone(),
            }),
        }
    }

    /// Release asset name for this platform, e.g. `tailwindcss-linux-x64`
    pub fn asset_name(&self) -> Result<String, ProvisionError> {
        let (os, arch) = self.target()?;
        Ok(asset_name(os, arch))
    }

    /// File name of the installed executable
    pub fn binary_name(&self) -> &'static str {
        if Os::parse(&self.os) == Some(Os::Windows) {
            "tailwindcss.exe"
        } else {
            "tailwindcss"
        }
    }
}

pub fn asset_name(os: Os, arch: Arch) -> String {
    let extension = match os {
        Os::Windows => ".exe",
        Os::MacOS | Os::Linux => "",
    };
    format!(
        "tailwindcss-{}-{}{}",
        os.asset_segment(),
        arch.asset_segment(),
        extension
    )
}
