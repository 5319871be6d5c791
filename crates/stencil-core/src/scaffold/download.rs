//! Template acquisition
//!
//! Templates are repositories; acquiring one is a shallow clone into
//! the target directory followed by detaching it from its origin.
//! Built-in and custom templates differ only in the stored locator
//! (HTTPS vs SSH remote), not in how they are fetched.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Clone the template repository at `url` into `target` and strip the
/// clone's `.git` directory so the project starts with clean history.
pub async fn clone_template(url: &str, target: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(["clone", "--depth", "1"])
        .arg(url)
        .arg(target)
        .output()
        .await
        .context("failed to run git clone")?;

    if !output.status.success() {
        anyhow::bail!(
            "git clone failed for {}:\n{}",
            url,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let git_dir = target.join(".git");
    if git_dir.exists() {
        tokio::fs::remove_dir_all(&git_dir)
            .await
            .with_context(|| format!("failed to remove {}", git_dir.display()))?;
    }

    Ok(())
}
