//! `twlab status` - report the cache state without touching the network

use crate::context::Context;
use crate::output::print_line;
use anyhow::Result;
use twlab_tailwind::Provisioner;

pub fn run(ctx: &Context, version: Option<String>, json: bool) -> Result<()> {
    let options = ctx.load_options(|options| {
        if let Some(version) = version {
            options.version = version;
        }
    })?;

    let status = Provisioner::new(&ctx.content_root).status(&options)?;

    if json {
        print_line(&serde_json::to_string_pretty(&status)?)?;
        return Ok(());
    }

    print_line(&format!("tailwindcss {}", status.version))?;
    print_line(&format!(
        "  platform:  {}/{}",
        status.platform.os(),
        status.platform.arch()
    ))?;
    print_line(&format!(
        "  asset:     {}",
        status.asset.as_deref().unwrap_or("(unsupported platform)")
    ))?;
    print_line(&format!("  path:      {}", status.path.display()))?;
    print_line(&format!(
        "  installed: {}",
        if status.installed { "yes" } else { "no" }
    ))?;

    Ok(())
}
