//! Python environment setup.
//!
//! Creates the virtual environment inside the working copy and installs the
//! declared dependencies. Environment creation tries the built-in venv
//! module first and falls back to virtualenv; both failing is fatal.

use anyhow::{Context, Result, bail};
use duct::cmd;
use std::path::{Path, PathBuf};

use super::{BootstrapContext, first_existing};
use crate::config;
use crate::ui::prelude::*;

/// Isolation strategies, tried in order; the first success wins.
const CREATE_STRATEGIES: &[(&str, &[&str])] = &[
    ("python3", &["-m", "venv", config::VENV_DIR]),
    ("virtualenv", &[config::VENV_DIR]),
];

/// Create the virtual environment in the working copy and return its path.
pub fn create_venv(ctx: &BootstrapContext) -> Result<PathBuf> {
    let venv = ctx.workdir.join(config::VENV_DIR);

    let mut last_error = None;
    for (program, args) in CREATE_STRATEGIES {
        emit(
            Level::Debug,
            "python.venv_attempt",
            &format!("Creating virtual environment with {}", program),
        );
        match cmd(*program, args.iter().copied()).dir(&ctx.workdir).run() {
            Ok(_) => {
                emit(
                    Level::Success,
                    "python.venv_created",
                    &format!("Virtual environment ready at {}", venv.display()),
                );
                return Ok(venv);
            }
            Err(e) => {
                emit(
                    Level::Warn,
                    "python.venv_failed",
                    &format!("{} could not create the virtual environment: {}", program, e),
                );
                last_error = Some(e);
            }
        }
    }

    bail!(
        "Could not create a virtual environment with any strategy: {}",
        last_error.map(|e| e.to_string()).unwrap_or_default()
    )
}

/// Install dependencies from the first existing manifest. Both manifests
/// absent is a no-op, not an error.
pub fn install_requirements(ctx: &BootstrapContext, venv: &Path) -> Result<()> {
    let Some(manifest) = first_existing(&ctx.workdir, config::PYTHON_MANIFESTS) else {
        emit(
            Level::Info,
            "python.no_manifest",
            "No requirements.txt found, skipping Python dependencies",
        );
        return Ok(());
    };

    emit(
        Level::Info,
        "python.install",
        &format!("Installing Python dependencies from {}", manifest.display()),
    );

    // Activation without shell state: invoke pip straight from the venv.
    let pip = venv_tool(venv, ctx, "pip");
    let args: Vec<std::ffi::OsString> =
        vec!["install".into(), "-r".into(), manifest.clone().into()];
    cmd(pip, args)
        .dir(&ctx.workdir)
        .run()
        .with_context(|| format!("pip install -r {} failed", manifest.display()))?;

    emit(Level::Success, "python.installed", "Python dependencies installed");
    Ok(())
}

/// Path of a tool inside the virtual environment, honoring the host shell's
/// venv layout.
fn venv_tool(venv: &Path, ctx: &BootstrapContext, tool: &str) -> PathBuf {
    let mut path = venv.join(ctx.shell.venv_bin_dir()).join(tool);
    if ctx.shell == crate::common::platform::ShellKind::Windows {
        path.set_extension("exe");
    }
    path
}
