//! Lifecycle of one long-running child process
//!
//! The supervisor owns at most one child. The child is started in its own
//! process group (Unix) so that stopping it also takes down every process
//! it spawned; on Windows the same is achieved with `taskkill /T`.
//!
//! ```text
//! Idle ──start──▶ Starting ──spawned──▶ Running ──stop/dispose──▶ Stopping ──▶ Stopped
//!   ▲                │ launch error                                              │
//!   └────────────────┘                                  start (restart) ◀────────┘
//! ```

use crate::command::WatchCommand;
use crate::sink::{LineSink, Stream};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use twlab_core::TwlabError;

/// How long `stop` waits for the child to be reaped after the kill signal
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Starting,
    Running,
    Stopping,
    Stopped,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("process is already running (pid {pid})")]
    AlreadyRunning { pid: u32 },

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<LaunchError> for TwlabError {
    fn from(err: LaunchError) -> Self {
        TwlabError::TailwindLaunchFailed(err.to_string())
    }
}

/// A live child and the tasks draining its output
#[derive(Debug)]
pub struct SupervisedProcess {
    pid: u32,
    started_at: DateTime<Utc>,
    child: Child,
    readers: Vec<JoinHandle<()>>,
}

impl SupervisedProcess {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }

    fn abort_readers(&mut self) {
        for reader in self.readers.drain(..) {
            reader.abort();
        }
    }
}

/// Starts, stops and disposes a single watch process.
///
/// `start` must be called from within a Tokio runtime. `dispose` is
/// synchronous and also runs when the supervisor is dropped.
pub struct Supervisor {
    state: SupervisorState,
    process: Option<SupervisedProcess>,
    /// Group of a leader that exited on its own; its descendants may live on
    exited_group: Option<u32>,
    sink: Arc<dyn LineSink>,
    stop_timeout: Duration,
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("state", &self.state)
            .field("process", &self.process)
            .field("exited_group", &self.exited_group)
            .field("stop_timeout", &self.stop_timeout)
            .finish_non_exhaustive()
    }
}

impl Supervisor {
    pub fn new(sink: Arc<dyn LineSink>) -> Self {
        Self {
            state: SupervisorState::Idle,
            process: None,
            exited_group: None,
            sink,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
        }
    }

    pub fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().map(SupervisedProcess::pid)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.process.as_ref().map(SupervisedProcess::started_at)
    }

    /// Re-checks the child and forgets it if it has exited on its own
    pub fn refresh(&mut self) -> SupervisorState {
        if let Some(process) = self.process.as_mut()
            && let Ok(Some(status)) = process.child.try_wait()
        {
            info!(pid = process.pid, %status, "Watch process exited");
            // Readers finish on EOF, once the last descendant closes the pipes.
            self.exited_group = Some(process.pid);
            self.process = None;
            self.state = SupervisorState::Stopped;
        }
        self.state
    }

    pub fn is_running(&mut self) -> bool {
        self.refresh() == SupervisorState::Running
    }

    fn kill_exited_group(&mut self) {
        if let Some(pid) = self.exited_group.take() {
            debug!(pid, "Killing descendants of exited watch process");
            kill_remaining(pid);
        }
    }

    /// Launches `command` and starts forwarding its output.
    ///
    /// Returns the child's pid.
    ///
    /// # Errors
    ///
    /// Returns error if a child is already running, the output directory
    /// cannot be created, or the program cannot be spawned. The supervisor
    /// is left as it was before the call.
    pub fn start(&mut self, command: &WatchCommand) -> Result<u32, LaunchError> {
        if self.is_running()
            && let Some(pid) = self.pid()
        {
            return Err(LaunchError::AlreadyRunning { pid });
        }

        self.kill_exited_group();

        let previous = self.state;
        self.state = SupervisorState::Starting;

        match self.launch(command) {
            Ok(process) => {
                let pid = process.pid;
                self.process = Some(process);
                self.state = SupervisorState::Running;
                Ok(pid)
            }
            Err(err) => {
                self.state = previous;
                Err(err)
            }
        }
    }

    fn launch(&self, command: &WatchCommand) -> Result<SupervisedProcess, LaunchError> {
        if let Some(output) = command.get_output_path()
            && let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| LaunchError::OutputDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!(
            program = %command.program().display(),
            args = ?command.get_args(),
            cwd = %command.working_dir().display(),
            "Spawning watch process"
        );

        let mut cmd = Command::new(command.program());
        cmd.args(command.get_args())
            .current_dir(command.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so the whole tree can be signalled at once
        #[cfg(unix)]
        {
            cmd.process_group(0);
        }

        #[cfg(windows)]
        {
            // CREATE_NO_WINDOW
            cmd.creation_flags(0x0800_0000);
        }

        let spawn_error = |source: std::io::Error| LaunchError::Spawn {
            program: command.program().to_path_buf(),
            source,
        };

        let mut child = cmd.spawn().map_err(spawn_error)?;
        let pid = child
            .id()
            .ok_or_else(|| spawn_error(std::io::Error::other("exited before its pid was read")))?;

        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(tokio::spawn(forward_lines(
                stdout,
                Stream::Stdout,
                Arc::clone(&self.sink),
            )));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(tokio::spawn(forward_lines(
                stderr,
                Stream::Stderr,
                Arc::clone(&self.sink),
            )));
        }

        Ok(SupervisedProcess {
            pid,
            started_at: Utc::now(),
            child,
            readers,
        })
    }

    /// Kills the child and all of its descendants, then reaps it.
    ///
    /// A no-op when nothing is running. Never fails: errors while signalling
    /// or waiting are logged.
    pub async fn stop(&mut self) {
        let Some(mut process) = self.process.take() else {
            self.kill_exited_group();
            return;
        };

        if process.has_exited() {
            debug!(pid = process.pid, "Watch process already exited");
            kill_remaining(process.pid);
            process.abort_readers();
            self.state = SupervisorState::Stopped;
            return;
        }

        self.state = SupervisorState::Stopping;
        info!(pid = process.pid, "Stopping watch process");

        // The child is not reaped yet, so its pid cannot have been reused.
        kill_tree(process.pid);
        if let Err(e) = process.child.start_kill() {
            debug!(pid = process.pid, error = %e, "Direct kill failed");
        }

        match tokio::time::timeout(self.stop_timeout, process.child.wait()).await {
            Ok(Ok(status)) => debug!(pid = process.pid, %status, "Watch process reaped"),
            Ok(Err(e)) => warn!(pid = process.pid, error = %e, "Failed to wait for watch process"),
            Err(_) => warn!(
                pid = process.pid,
                timeout = ?self.stop_timeout,
                "Watch process did not exit in time"
            ),
        }

        for reader in process.readers.drain(..) {
            let abort = reader.abort_handle();
            if tokio::time::timeout(self.stop_timeout, reader).await.is_err() {
                abort.abort();
            }
        }

        self.state = SupervisorState::Stopped;
    }

    /// Synchronous teardown for shutdown paths that cannot await.
    ///
    /// Kills the process tree if it is still alive and abandons the output
    /// readers. Safe to call repeatedly and without a prior `start`.
    pub fn dispose(&mut self) {
        let Some(mut process) = self.process.take() else {
            self.kill_exited_group();
            return;
        };

        if process.has_exited() {
            kill_remaining(process.pid);
        } else {
            debug!(pid = process.pid, "Disposing running watch process");
            kill_tree(process.pid);
            if let Err(e) = process.child.start_kill() {
                debug!(pid = process.pid, error = %e, "Direct kill failed");
            }
        }

        process.abort_readers();
        self.state = SupervisorState::Stopped;
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn forward_lines<R>(reader: R, stream: Stream, sink: Arc<dyn LineSink>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => sink.emit(stream.level(), &line),
            Ok(None) => break,
            Err(e) => {
                warn!(stream = stream.as_str(), error = %e, "Failed to read watch output");
                break;
            }
        }
    }
    debug!(stream = stream.as_str(), "Watch output closed");
}

/// Kills what is left of the group after its leader exited.
///
/// The pgid stays reserved while any member is alive, so signalling it
/// cannot hit an unrelated process group. Windows has no group to address
/// once the parent is gone.
fn kill_remaining(pid: u32) {
    #[cfg(unix)]
    kill_tree(pid);
    #[cfg(windows)]
    debug!(pid, "Leader exited, descendants cannot be located");
}

#[cfg(unix)]
fn kill_tree(pid: u32) {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        warn!(pid, "Pid out of range, cannot signal process group");
        return;
    };

    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) => {}
        Err(Errno::ESRCH) => debug!(pid, "Process group already gone"),
        Err(e) => warn!(pid, error = %e, "Failed to kill process group"),
    }
}

#[cfg(windows)]
fn kill_tree(pid: u32) {
    let result = std::process::Command::new("taskkill")
        .args(["/pid", &pid.to_string(), "/T", "/F"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => {}
        // 128: no such process
        Ok(status) => debug!(pid, %status, "taskkill reported failure"),
        Err(e) => warn!(pid, error = %e, "Failed to run taskkill"),
    }
}
