//! Repository synchronization.
//!
//! A pre-existing working copy is fast-forwarded in place; otherwise the
//! remote is cloned fresh. Later phases receive the working-copy path
//! through the bootstrap context instead of a process-wide chdir.

use anyhow::{Context, Result, bail};
use git2::Repository;
use std::path::{Path, PathBuf};

use crate::common::git;
use crate::ui::prelude::*;

/// Ensure `target` holds an up-to-date working copy of `url` and return its
/// path.
pub fn sync_repository(url: &str, target: &Path) -> Result<PathBuf> {
    if target.join(".git").is_dir() {
        emit(
            Level::Info,
            "repo.update",
            &format!("Updating existing working copy at {}", target.display()),
        );

        let mut repo = Repository::open(target)
            .with_context(|| format!("Failed to open repository at {}", target.display()))?;

        let moved = git::fast_forward_pull(&mut repo)?;
        if moved {
            emit(Level::Success, "repo.updated", "Working copy fast-forwarded");
        } else {
            emit(Level::Info, "repo.up_to_date", "Working copy already up to date");
        }
    } else if target.exists() {
        bail!(
            "{} exists but is not a git working copy; move it aside and rerun",
            target.display()
        );
    } else {
        emit(
            Level::Info,
            "repo.clone",
            &format!("Cloning {} into {}", url, target.display()),
        );
        git::clone_repo(url, target)?;
        emit(Level::Success, "repo.cloned", "Repository cloned");
    }

    Ok(target.to_path_buf())
}
