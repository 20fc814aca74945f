//! Supervision of `tailwindcss --watch` for twlab.
//!
//! [`WatchService`] is the host-facing entry point: it checks the host
//! environment, provisions the binary through `twlab-tailwind` and hands
//! the resulting command to a [`Supervisor`], which owns the child process.
//!
//! Output is forwarded line by line to a [`LineSink`]: stdout at DEBUG,
//! stderr at WARN. Stopping or disposing kills the child together with
//! every process it spawned.
//!
//! # Example
//!
//! ```no_run
//! use twlab_core::{HostEnvironment, ToolOptions};
//! use twlab_watch::WatchService;
//!
//! # async fn run() {
//! let mut service = WatchService::new(ToolOptions::default(), HostEnvironment::development("."));
//! service.start().await;
//! // ... serve until shutdown ...
//! service.stop().await;
//! # }
//! ```

pub mod command;
pub mod service;
pub mod sink;
pub mod supervisor;

pub use command::WatchCommand;
pub use service::WatchService;
pub use sink::{LineSink, Stream, TracingSink};
pub use supervisor::{
    DEFAULT_STOP_TIMEOUT, LaunchError, SupervisedProcess, Supervisor, SupervisorState,
};
