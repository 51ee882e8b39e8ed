//! Prerequisite installation.
//!
//! Invoked only when git is missing from PATH. Drives the platform's native
//! package manager to install the bootstrap prerequisite set; any installer
//! failure aborts the run.

use anyhow::{Context, Result};
use duct::cmd;

use crate::common::package::PackageManager;
use crate::common::platform::Platform;
use crate::ui::prelude::*;

/// Official Homebrew installer, fetched over the network. A failure here
/// (including a network failure) is fatal.
const BREW_BOOTSTRAP: &str =
    "curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh | /bin/bash";

/// Install the prerequisite packages for the detected platform.
///
/// Platforms without a supported package manager get a warning and no
/// installation; a missing git on those platforms surfaces later when the
/// repository sync fails.
pub fn install_prerequisites(platform: Platform) -> Result<()> {
    let Some(manager) = platform.package_manager() else {
        emit(
            Level::Warn,
            "deps.unsupported_platform",
            &format!(
                "No supported package manager on {}; install git, python3 and pip manually",
                platform
            ),
        );
        return Ok(());
    };

    if manager == PackageManager::Brew {
        ensure_brew()?;
    }

    if let Some((program, args)) = manager.refresh_command() {
        emit(
            Level::Debug,
            "deps.refresh",
            &format!("Refreshing {} package index", manager),
        );
        cmd(program, args)
            .run()
            .with_context(|| format!("Failed to refresh {} package index", manager))?;
    }

    let packages = manager.prerequisite_packages();
    emit(
        Level::Info,
        "deps.install",
        &format!("Installing {} via {}", packages.join(", "), manager),
    );

    let (program, base_args) = manager.install_command();
    let mut args: Vec<&str> = base_args.to_vec();
    args.extend(packages);

    cmd(program, &args)
        .run()
        .with_context(|| format!("Failed to install prerequisites with {}", manager))?;

    emit(Level::Success, "deps.installed", "Prerequisites installed");
    Ok(())
}

/// Bootstrap Homebrew itself when absent. macOS only.
fn ensure_brew() -> Result<()> {
    if which::which("brew").is_ok() {
        return Ok(());
    }

    emit(
        Level::Info,
        "deps.brew_bootstrap",
        "Homebrew not found, running the official installer",
    );

    cmd!("bash", "-c", BREW_BOOTSTRAP)
        .env("NONINTERACTIVE", "1")
        .run()
        .context("Homebrew bootstrap failed")?;

    Ok(())
}
