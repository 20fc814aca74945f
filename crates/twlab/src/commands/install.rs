//! `twlab install` - provision tailwindcss without running it

use crate::context::Context;
use crate::output::print_line;
use anyhow::Result;
use twlab_tailwind::{Provision, Provisioner};

pub fn run(ctx: &Context, version: Option<String>) -> Result<()> {
    let options = ctx.load_options(|options| {
        if let Some(version) = version {
            options.version = version;
        }
    })?;

    let provisioner = Provisioner::new(&ctx.content_root);
    let binary = provisioner.ensure(&options)?;

    if binary.downloaded {
        print_line(&format!(
            "✓ Installed tailwindcss {} to {}",
            binary.version,
            binary.path.display()
        ))?;
    } else {
        print_line(&format!(
            "✓ tailwindcss {} already installed at {}",
            binary.version,
            binary.path.display()
        ))?;
    }

    Ok(())
}
