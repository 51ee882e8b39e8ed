//! Node package installation.
//!
//! Runs only when a package.json is present. `npm install` is the primary
//! strategy; on failure a single alternate attempt is made with yarn when
//! available, or npm with relaxed peer-dependency resolution otherwise.

use anyhow::{Context, Result};
use duct::cmd;

use super::{BootstrapContext, first_existing};
use crate::config;
use crate::ui::prelude::*;

/// Install Node dependencies if a manifest is present.
pub fn install_packages(ctx: &BootstrapContext) -> Result<()> {
    let Some(manifest) = first_existing(&ctx.workdir, config::NODE_MANIFESTS) else {
        emit(
            Level::Info,
            "node.no_manifest",
            "No package.json found, skipping Node dependencies",
        );
        return Ok(());
    };

    // Install in the directory that holds the manifest.
    let dir = match manifest.parent() {
        Some(parent) if parent.as_os_str().is_empty() => ctx.workdir.clone(),
        Some(parent) => ctx.workdir.join(parent),
        None => ctx.workdir.clone(),
    };

    emit(
        Level::Info,
        "node.install",
        &format!("Installing Node dependencies from {}", manifest.display()),
    );

    if let Err(primary) = cmd("npm", ["install"]).dir(&dir).run() {
        let (program, args) = fallback_strategy(which::which("yarn").is_ok());
        emit(
            Level::Warn,
            "node.fallback",
            &format!("npm install failed ({}), retrying with {}", primary, program),
        );

        cmd(program, args.iter().copied())
            .dir(&dir)
            .run()
            .with_context(|| format!("{} also failed after npm install", program))?;
    }

    emit(Level::Success, "node.installed", "Node dependencies installed");
    Ok(())
}

/// The single alternate attempt made after `npm install` fails.
fn fallback_strategy(yarn_available: bool) -> (&'static str, &'static [&'static str]) {
    if yarn_available {
        ("yarn", &["install"])
    } else {
        ("npm", &["install", "--legacy-peer-deps"])
    }
}
