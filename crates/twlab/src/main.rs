mod cli;
mod commands;
mod context;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::Context;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = Context::new(cli.content_root.as_deref(), &cli.config).and_then(|ctx| {
        match cli.command {
            Commands::Install { version } => commands::install::run(&ctx, version),
            Commands::Status { version, json } => commands::status::run(&ctx, version, json),
            Commands::Watch {
                version,
                input,
                output,
                environment,
                extra_args,
            } => commands::watch::run(
                &ctx,
                commands::watch::WatchArgs {
                    version,
                    input,
                    output,
                    environment,
                    extra_args,
                },
            ),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
