//! Bootstrap pipeline.
//!
//! The phases run once each, strictly in order: platform detection,
//! prerequisite installation (only when git is missing), repository sync,
//! Python environment setup, Node package installation, launcher
//! generation. Any phase error aborts the run.

pub mod deps;
pub mod launcher;
pub mod node;
pub mod python;
pub mod repo;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::common::platform::{HostSignals, Platform, ShellKind};
use crate::config;
use crate::ui::prelude::*;

/// Resolved environment threaded through every phase, replacing the ambient
/// shell state (cwd changes, activation variables) of a classic setup
/// script.
#[derive(Debug, Clone)]
pub struct BootstrapContext {
    pub platform: Platform,
    pub shell: ShellKind,
    pub workdir: PathBuf,
}

/// Run the full bootstrap sequence.
pub fn run() -> Result<()> {
    let signals = HostSignals::capture();
    let platform = Platform::classify(&signals);
    let shell = ShellKind::detect(&signals);

    emit(
        Level::Info,
        "bootstrap.platform",
        &format!("Detected platform: {}", platform),
    );

    if which::which("git").is_err() {
        deps::install_prerequisites(platform)?;
    } else {
        emit(
            Level::Debug,
            "bootstrap.git_present",
            "git already installed, skipping prerequisite installation",
        );
    }

    let workdir = repo::sync_repository(config::REPO_URL, Path::new(config::WORK_DIR))?;
    let ctx = BootstrapContext {
        platform,
        shell,
        workdir,
    };

    let venv = python::create_venv(&ctx)?;
    python::install_requirements(&ctx, &venv)?;
    node::install_packages(&ctx)?;

    launcher::write_launchers(&ctx.workdir, ctx.shell)?;

    emit(
        Level::Success,
        "bootstrap.done",
        &format!(
            "Bootstrap complete. Start the application with {}/{}",
            ctx.workdir.display(),
            config::POSIX_LAUNCHER
        ),
    );
    Ok(())
}

/// Probe `candidates` (relative to `dir`) in order and return the first one
/// that exists as a file.
pub fn first_existing(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|candidate| dir.join(candidate).is_file())
}

#[cfg(test)]
pub mod testutil {
    use std::ffi::OsString;
    use std::path::Path;

    /// Replace `PATH` for the duration of a test, restoring the previous
    /// value on drop. The environment is process-global, so every test using
    /// this (or spawning subprocesses resolved through `PATH`) must carry
    /// `#[serial]`.
    pub struct PathOverride(Option<OsString>);

    impl PathOverride {
        pub fn to(dir: &Path) -> Self {
            let previous = std::env::var_os("PATH");
            // SAFETY: callers are serialized via serial_test.
            unsafe { std::env::set_var("PATH", dir) };
            Self(previous)
        }
    }

    impl Drop for PathOverride {
        fn drop(&mut self) {
            // SAFETY: same serialization as in `to`.
            unsafe {
                match self.0.take() {
                    Some(previous) => std::env::set_var("PATH", previous),
                    None => std::env::remove_var("PATH"),
                }
            }
        }
    }

    /// Write an executable stub that appends its name to `log` and exits
    /// nonzero.
    #[cfg(unix)]
    pub fn failing_stub(bin: &Path, name: &str, log: &Path) -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let path = bin.join(name);
        std::fs::write(
            &path,
            format!("#!/bin/sh\necho {} >> \"{}\"\nexit 1\n", name, log.display()),
        )?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_existing_prefers_earlier_candidate() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        std::fs::write(tmp.path().join("requirements.txt"), "flask\n")?;
        std::fs::create_dir(tmp.path().join("app"))?;
        std::fs::write(tmp.path().join("app/requirements.txt"), "flask\n")?;

        let found = first_existing(tmp.path(), config::PYTHON_MANIFESTS);
        assert_eq!(found, Some(PathBuf::from("requirements.txt")));
        Ok(())
    }

    #[test]
    fn test_first_existing_nested_only() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        std::fs::create_dir(tmp.path().join("app"))?;
        std::fs::write(tmp.path().join("app/requirements.txt"), "flask\n")?;

        let found = first_existing(tmp.path(), config::PYTHON_MANIFESTS);
        assert_eq!(found, Some(PathBuf::from("app/requirements.txt")));
        Ok(())
    }

    #[test]
    fn test_first_existing_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(first_existing(tmp.path(), config::PYTHON_MANIFESTS), None);
        // Directories do not count as manifests.
        std::fs::create_dir(tmp.path().join("requirements.txt")).unwrap();
        assert_eq!(first_existing(tmp.path(), config::PYTHON_MANIFESTS), None);
    }
}
