//! git subprocess helpers for project bootstrap

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Message used for the generated project's first commit.
const INITIAL_COMMIT_MESSAGE: &str = "chore: initial commit from stencil";

/// Check if git is available in PATH
pub fn has_git() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Initialize a repository in `dir`.
pub fn init(dir: &Path) -> Result<()> {
    let status = Command::new("git")
        .arg("init")
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("failed to run git init")?;
    if !status.success() {
        anyhow::bail!("git init failed in {}", dir.display());
    }
    Ok(())
}

/// Stage everything and create the initial commit. Returns false when
/// either step fails, typically because user.name/user.email are not
/// configured; the caller downgrades that to a warning.
pub fn initial_commit(dir: &Path) -> bool {
    let add = Command::new("git")
        .args(["add", "-A"])
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if !add.map(|status| status.success()).unwrap_or(false) {
        return false;
    }

    Command::new("git")
        .args(["commit", "-m", INITIAL_COMMIT_MESSAGE])
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// The configured git author name, if any. Used as the `author` field
/// of generated library manifests.
pub fn user_name() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
