//! Project generation from a resolved template
//!
//! This module provides:
//! - Target path and package-name resolution (npm scoped names)
//! - Template acquisition by shallow clone
//! - package.json patching and lint-tooling removal
//! - README generation
//! - Dependency installation

pub mod download;
pub mod manifest;
pub mod naming;
pub mod readme;

pub use download::clone_template;
pub use manifest::{patch_manifest, PatchOptions};
pub use readme::generate_readme;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the project lands and what it is called.
///
/// For a scoped `@scope/name` argument the package keeps the full
/// scoped name while the directory is the final path segment; for
/// everything else the package is named after the directory.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub project_name: String,
    pub package_name: String,
    pub is_scoped: bool,
}

impl ProjectPaths {
    pub fn resolve(name: &str) -> Result<Self> {
        let root = if Path::new(name).is_absolute() {
            PathBuf::from(name)
        } else {
            std::env::current_dir()
                .context("failed to read current directory")?
                .join(name)
        };
        let project_name = root
            .file_name()
            .map(|segment| segment.to_string_lossy().into_owned())
            .with_context(|| format!("\"{}\" is not a usable project name", name))?;
        let is_scoped = naming::is_scoped_package(name);
        let package_name = if is_scoped {
            name.to_string()
        } else {
            project_name.clone()
        };
        Ok(Self {
            root,
            project_name,
            package_name,
            is_scoped,
        })
    }
}

/// Run `npm install` in the project root with inherited stdio so the
/// user sees the installer's own progress output.
pub async fn install_dependencies(root: &Path) -> Result<()> {
    let status = tokio::process::Command::new("npm")
        .arg("install")
        .current_dir(root)
        .status()
        .await
        .context("failed to run npm install")?;
    if !status.success() {
        anyhow::bail!(
            "npm install exited with status {}",
            status.code().unwrap_or(-1)
        );
    }
    Ok(())
}
