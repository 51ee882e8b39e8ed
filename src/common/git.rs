use anyhow::{Context, Result, bail};
use git2::{
    FetchOptions, Repository,
    build::{CheckoutBuilder, RepoBuilder},
};
use std::path::Path;

/// Clone a repository into the target directory
pub fn clone_repo(url: &str, target: &Path) -> Result<Repository> {
    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(git2::RemoteCallbacks::new());

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);

    let repo = builder
        .clone(url, target)
        .with_context(|| format!("Failed to clone {}", url))?;

    Ok(repo)
}

/// Get the current checked out branch name
pub fn current_branch(repo: &Repository) -> Result<String> {
    let head = repo.head().context("Failed to get HEAD reference")?;

    let head_name = head
        .shorthand()
        .ok_or_else(|| anyhow::anyhow!("HEAD is detached"))?;

    Ok(head_name.to_string())
}

/// Fetch origin and fast-forward the current branch.
///
/// Returns `true` if the branch moved, `false` if it was already up to date.
/// Fails when the remote is unreachable or when local history has diverged
/// in a way that cannot be fast-forwarded; this tool never merges or rebases
/// on the user's behalf.
pub fn fast_forward_pull(repo: &mut Repository) -> Result<bool> {
    let branch = current_branch(repo)?;

    let mut remote = repo
        .find_remote("origin")
        .context("Failed to find origin remote")?;

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(git2::RemoteCallbacks::new());

    remote
        .fetch(&[branch.as_str()], Some(&mut fetch_options), None)
        .with_context(|| format!("Failed to fetch branch {}", branch))?;
    drop(remote);

    let fetch_head = repo
        .find_reference("FETCH_HEAD")
        .context("Failed to find FETCH_HEAD after fetch")?;
    let fetched = repo.reference_to_annotated_commit(&fetch_head)?;

    let (analysis, _) = repo
        .merge_analysis(&[&fetched])
        .context("Failed to analyze merge")?;

    if analysis.is_up_to_date() {
        return Ok(false);
    }

    if !analysis.is_fast_forward() {
        bail!(
            "Local branch '{}' has diverged from origin and cannot be fast-forwarded",
            branch
        );
    }

    let refname = format!("refs/heads/{branch}");
    let mut reference = repo
        .find_reference(&refname)
        .with_context(|| format!("Failed to find reference {}", refname))?;
    reference.set_target(fetched.id(), "fast-forward")?;

    repo.set_head(&refname).context("Failed to set HEAD")?;
    repo.checkout_head(Some(CheckoutBuilder::new().force()))
        .context("Failed to checkout fast-forwarded HEAD")?;

    Ok(true)
}
