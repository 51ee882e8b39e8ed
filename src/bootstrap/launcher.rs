//! Launcher generation.
//!
//! Emits self-contained launcher scripts into the working copy. The scripts
//! re-derive the virtual environment location and probe the entry-point
//! candidates at run time, so they keep working without rerunning the
//! bootstrapper. Existing launchers are overwritten unconditionally.

use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::common::platform::ShellKind;
use crate::common::shell::shell_quote;
use crate::config;
use crate::ui::prelude::*;

/// Build the POSIX launcher script.
pub fn posix_launcher_script() -> Result<String> {
    let mut s = String::new();

    writeln!(s, "#!/bin/sh")?;
    writeln!(
        s,
        "# Generated by mediastrap. Rerunning the bootstrapper overwrites this file."
    )?;
    writeln!(s)?;

    // Virtual environment candidates: top level, then nested under app/.
    // Windows-compatible shells lay the venv out under Scripts/ instead of
    // bin/, so the shell-type indicator is consulted again at run time.
    writeln!(s, "case \"$OSTYPE\" in")?;
    writeln!(s, "    msys*|cygwin*|win32*) venv_bin=Scripts ;;")?;
    writeln!(s, "    *) venv_bin=bin ;;")?;
    writeln!(s, "esac")?;
    writeln!(s)?;
    writeln!(s, "for dir in {} {}/{}; do", config::VENV_DIR, config::APP_SUBDIR, config::VENV_DIR)?;
    writeln!(s, "    if [ -f \"$dir/$venv_bin/activate\" ]; then")?;
    writeln!(s, "        . \"$dir/$venv_bin/activate\"")?;
    writeln!(s, "        break")?;
    writeln!(s, "    fi")?;
    writeln!(s, "done")?;

    // Entry points: Python candidates before Node candidates, first match
    // wins via exec.
    for (runtime, entries) in [
        ("python3", config::PYTHON_ENTRIES),
        ("node", config::NODE_ENTRIES),
    ] {
        let quoted: Vec<String> = entries.iter().map(|e| shell_quote(e)).collect();
        writeln!(s)?;
        writeln!(s, "for entry in {}; do", quoted.join(" "))?;
        writeln!(s, "    if [ -f \"$entry\" ]; then")?;
        writeln!(s, "        exec {} \"$entry\"", runtime)?;
        writeln!(s, "    fi")?;
        writeln!(s, "done")?;
    }

    writeln!(s)?;
    writeln!(s, "echo \"error: no entry point found\" >&2")?;
    writeln!(s, "echo \"candidate files in $(pwd):\" >&2")?;
    writeln!(s, "ls -1 -- *.py *.js 2>/dev/null >&2 || true")?;
    writeln!(s, "exit 1")?;

    Ok(s)
}

/// Build the Windows batch launcher, mirroring the POSIX probe order.
pub fn windows_launcher_script() -> Result<String> {
    let mut s = String::new();

    writeln!(s, "@echo off")?;
    writeln!(
        s,
        "rem Generated by mediastrap. Rerunning the bootstrapper overwrites this file."
    )?;
    writeln!(s)?;

    let venv_activate = format!("{}\\Scripts\\activate.bat", config::VENV_DIR);
    let nested_activate = format!(
        "{}\\{}\\Scripts\\activate.bat",
        config::APP_SUBDIR,
        config::VENV_DIR
    );
    writeln!(s, "if exist \"{venv_activate}\" (")?;
    writeln!(s, "    call \"{venv_activate}\"")?;
    writeln!(s, ") else if exist \"{nested_activate}\" (")?;
    writeln!(s, "    call \"{nested_activate}\"")?;
    writeln!(s, ")")?;

    for (runtime, entries) in [
        ("python", config::PYTHON_ENTRIES),
        ("node", config::NODE_ENTRIES),
    ] {
        for entry in entries {
            let entry = entry.replace('/', "\\");
            writeln!(s)?;
            writeln!(s, "if exist \"{entry}\" (")?;
            writeln!(s, "    {runtime} \"{entry}\"")?;
            writeln!(s, "    exit /b %ERRORLEVEL%")?;
            writeln!(s, ")")?;
        }
    }

    writeln!(s)?;
    writeln!(s, "echo error: no entry point found 1>&2")?;
    writeln!(s, "echo candidate files: 1>&2")?;
    writeln!(s, "dir /b *.py *.js 2>nul 1>&2")?;
    writeln!(s, "exit /b 1")?;

    Ok(s)
}

/// Write the POSIX launcher into the working copy and mark it executable.
pub fn write_posix_launcher(workdir: &Path) -> Result<PathBuf> {
    let path = workdir.join(config::POSIX_LAUNCHER);
    std::fs::write(&path, posix_launcher_script()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to mark {} executable", path.display()))?;
    }

    emit(
        Level::Success,
        "launcher.posix",
        &format!("Wrote {}", path.display()),
    );
    Ok(path)
}

/// Write the launcher set for the detected shell: the POSIX launcher
/// always, the batch launcher only for Windows-compatible shells.
pub fn write_launchers(workdir: &Path, shell: ShellKind) -> Result<()> {
    write_posix_launcher(workdir)?;
    if shell == ShellKind::Windows {
        write_windows_launcher(workdir)?;
    }
    Ok(())
}

/// Write the Windows batch launcher into the working copy.
pub fn write_windows_launcher(workdir: &Path) -> Result<PathBuf> {
    let path = workdir.join(config::WINDOWS_LAUNCHER);
    std::fs::write(&path, windows_launcher_script()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    emit(
        Level::Success,
        "launcher.windows",
        &format!("Wrote {}", path.display()),
    );
    Ok(path)
}
