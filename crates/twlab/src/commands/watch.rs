//! `twlab watch` - provision and supervise `tailwindcss --watch`

use crate::context::Context;
use anyhow::{Result, bail};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use twlab_core::HostEnvironment;
use twlab_watch::{SupervisorState, WatchService};

/// Command-line overrides for the `[tailwind]` options
pub struct WatchArgs {
    pub version: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub environment: Option<String>,
    pub extra_args: Vec<String>,
}

pub fn run(ctx: &Context, args: WatchArgs) -> Result<()> {
    let WatchArgs {
        version,
        input,
        output,
        environment,
        extra_args,
    } = args;

    let options = ctx.load_options(|options| {
        if let Some(version) = version {
            options.version = version;
        }
        if let Some(input) = input {
            options.input_file = input;
        }
        if let Some(output) = output {
            options.output_file = output;
        }
        options.extra_args.extend(extra_args);
    })?;

    let environment = match environment {
        Some(name) => HostEnvironment::new(name, &ctx.content_root),
        None => HostEnvironment::from_env(&ctx.content_root),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut service = WatchService::new(options, environment);

        if service.start().await.is_none() {
            if service.environment().is_development() {
                bail!("tailwindcss watch mode did not start");
            }
            info!(
                environment = service.environment().name(),
                "Nothing to do outside development"
            );
            return Ok(());
        }

        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                info!("Shutting down");
            }
            _ = exited(&mut service) => {
                warn!("tailwindcss exited on its own, not restarting");
            }
        }

        service.stop().await;
        service.dispose();
        Ok(())
    })
}

/// Resolves once the supervised process is no longer running
async fn exited(service: &mut WatchService) {
    let mut interval = tokio::time::interval(Duration::from_millis(500));
    loop {
        interval.tick().await;
        if service.state() != SupervisorState::Running {
            return;
        }
    }
}
