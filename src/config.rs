//! Fixed bootstrap configuration.
//!
//! Everything the bootstrapper does is keyed off the detected environment;
//! the remote, directory names and probe orders are compile-time constants.

/// Remote the application source is cloned from / pulled into.
pub const REPO_URL: &str = "https://github.com/mediaworks/media-automation.git";

/// Name of the working copy directory, created next to the bootstrapper.
pub const WORK_DIR: &str = "media-automation";

/// Application subdirectory inside the working copy. Manifests and entry
/// points may live either at the top level or nested under this directory.
pub const APP_SUBDIR: &str = "app";

/// Directory name of the Python virtual environment inside the working copy.
pub const VENV_DIR: &str = "venv";

/// Python dependency manifests, probed in order; the first existing wins.
pub const PYTHON_MANIFESTS: &[&str] = &["requirements.txt", "app/requirements.txt"];

/// Node dependency manifests, probed in order; the first existing wins.
pub const NODE_MANIFESTS: &[&str] = &["package.json", "app/package.json"];

/// Python entry-point candidates, in launch priority order.
pub const PYTHON_ENTRIES: &[&str] = &["app.py", "app/app.py"];

/// Node entry-point candidates, tried after all Python candidates.
pub const NODE_ENTRIES: &[&str] = &["index.js", "app/index.js"];

/// POSIX launcher written into the working copy on every run.
pub const POSIX_LAUNCHER: &str = "start.sh";

/// Windows launcher, written only when a Windows-compatible shell was
/// detected at install time.
pub const WINDOWS_LAUNCHER: &str = "start.bat";
