//! Shared helpers for watch tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::Level;
use twlab_core::ToolOptions;
use twlab_tailwind::{Platform, Provision, ProvisionError, ProvisionedBinary};
use twlab_watch::LineSink;

pub const WAIT: Duration = Duration::from_secs(10);

/// Keeps every emitted line in memory
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, level: Level, line: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(l, s)| *l == level && s == line)
    }

    /// Polls until `level`/`line` has been emitted or `WAIT` elapses
    pub async fn wait_for(&self, level: Level, line: &str) -> bool {
        wait_until(|| self.contains(level, line)).await
    }
}

impl LineSink for MemorySink {
    fn emit(&self, level: Level, line: &str) {
        self.lines.lock().unwrap().push((level, line.to_string()));
    }
}

pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    condition()
}

/// Returns a fixed binary path and counts calls
pub struct FakeProvisioner {
    binary: Option<PathBuf>,
    calls: AtomicUsize,
}

impl FakeProvisioner {
    pub fn returning(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: Some(binary.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            binary: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Provision for FakeProvisioner {
    fn ensure(&self, options: &ToolOptions) -> Result<ProvisionedBinary, ProvisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.binary {
            Some(path) => Ok(ProvisionedBinary {
                path: path.clone(),
                version: options.normalized_version().to_string(),
                platform: Platform::current(),
                downloaded: false,
            }),
            None => Err(ProvisionError::UnsupportedPlatform {
                os: "plan9".to_string(),
                arch: "mips".to_string(),
            }),
        }
    }

    fn target_path(&self, options: &ToolOptions) -> Result<PathBuf, ProvisionError> {
        Ok(match &self.binary {
            Some(path) => path.clone(),
            None => Path::new("cache")
                .join(options.normalized_version())
                .join("plan9-mips")
                .join("tailwindcss"),
        })
    }
}

/// Collects formatted `tracing` output for assertions
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Subscriber writing plain text into this buffer; install it with
    /// `tracing::subscriber::set_default`
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .with_writer(move || logs.clone())
            .finish()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Whether `pid` is a live (non-zombie) process
#[cfg(target_os = "linux")]
pub fn is_alive(pid: u32) -> bool {
    let Ok(stat) = std::fs::read_to_string(format!("/proc/{pid}/stat")) else {
        return false;
    };
    // State is the first field after the parenthesised command name
    match stat.rfind(')').and_then(|i| stat[i + 1..].split_whitespace().next()) {
        Some(state) => !matches!(state, "Z" | "X" | "x"),
        None => false,
    }
}

/// Reads a pid written by a test script, waiting for it to appear
pub async fn read_pid_file(path: &Path) -> Option<u32> {
    let mut pid = None;
    wait_until(|| {
        pid = std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok());
        pid.is_some()
    })
    .await;
    pid
}
