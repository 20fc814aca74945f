//! Development-only tailwindcss watch service

use crate::command::WatchCommand;
use crate::sink::{LineSink, TracingSink};
use crate::supervisor::{Supervisor, SupervisorState};
use std::sync::Arc;
use tracing::{debug, error, info};
use twlab_core::{HostEnvironment, ToolOptions};
use twlab_tailwind::{Provision, Provisioner};

/// Provisions tailwindcss and keeps `tailwindcss --watch` running for the
/// lifetime of a development session.
///
/// Nothing here fails the host: provisioning and launch errors are logged
/// and the service simply stays idle.
pub struct WatchService {
    options: ToolOptions,
    environment: HostEnvironment,
    provisioner: Arc<dyn Provision>,
    supervisor: Supervisor,
}

impl WatchService {
    pub fn new(options: ToolOptions, environment: HostEnvironment) -> Self {
        let provisioner = Provisioner::new(environment.content_root());
        Self {
            options,
            environment,
            provisioner: Arc::new(provisioner),
            supervisor: Supervisor::new(Arc::new(TracingSink::default())),
        }
    }

    pub fn with_provisioner(mut self, provisioner: Arc<dyn Provision>) -> Self {
        self.provisioner = provisioner;
        self
    }

    /// Replaces where output lines go. Only meaningful before `start`.
    pub fn with_sink(mut self, sink: Arc<dyn LineSink>) -> Self {
        self.supervisor = Supervisor::new(sink);
        self
    }

    pub fn options(&self) -> &ToolOptions {
        &self.options
    }

    pub fn environment(&self) -> &HostEnvironment {
        &self.environment
    }

    pub fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }

    pub fn state(&mut self) -> SupervisorState {
        self.supervisor.refresh()
    }

    /// Ensures the binary and launches watch mode.
    ///
    /// Returns the child's pid when a process was started. Outside the
    /// development environment this returns `None` without touching the
    /// cache or spawning anything.
    pub async fn start(&mut self) -> Option<u32> {
        if !self.environment.is_development() {
            debug!(
                environment = self.environment.name(),
                "Not a development environment, tailwindcss watch disabled"
            );
            return None;
        }

        let version = self.options.normalized_version().to_string();
        let provisioner = Arc::clone(&self.provisioner);
        let options = self.options.clone();

        // Provisioning does blocking network and filesystem I/O
        let binary = match tokio::task::spawn_blocking(move || provisioner.ensure(&options)).await
        {
            Ok(Ok(binary)) => binary,
            Ok(Err(e)) => {
                let path = match self.provisioner.target_path(&self.options) {
                    Ok(path) => path.display().to_string(),
                    Err(_) => "<unresolved>".to_string(),
                };
                error!(
                    version,
                    path = %path,
                    error = %e,
                    "Failed to provision tailwindcss, watch mode disabled"
                );
                return None;
            }
            Err(e) => {
                error!(version, error = %e, "Provisioning task failed, watch mode disabled");
                return None;
            }
        };

        let command =
            WatchCommand::tailwind(&binary.path, &self.options, self.environment.content_root());

        match self.supervisor.start(&command) {
            Ok(pid) => {
                info!(
                    pid,
                    version = binary.version,
                    input = %self.options.input_file.display(),
                    output = %self.options.output_file.display(),
                    "tailwindcss watch mode started"
                );
                Some(pid)
            }
            Err(e) => {
                error!(
                    version,
                    path = %binary.path.display(),
                    error = %e,
                    "Failed to start tailwindcss watch mode"
                );
                None
            }
        }
    }

    /// Kills the watch process tree; a no-op if nothing is running
    pub async fn stop(&mut self) {
        self.supervisor.stop().await;
    }

    pub fn dispose(&mut self) {
        self.supervisor.dispose();
    }
}
