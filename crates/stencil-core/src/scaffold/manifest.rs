//! package.json patching for generated projects
//!
//! The downloaded template ships a generic manifest; this module
//! rewrites it for the new project: identity fields, application vs
//! library shape, and removal of declined lint tooling together with
//! its config files and devDependencies.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// How the template's manifest should be rewritten.
#[derive(Debug, Clone)]
pub struct PatchOptions<'a> {
    pub package_name: &'a str,
    pub project_name: &'a str,
    pub template_name: &'a str,
    pub is_library: bool,
    pub is_scoped: bool,
    /// Keep ESLint wiring (config files, manifest keys, devDependencies).
    pub keep_eslint: bool,
    /// Whether a git repository was initialized; lint-staged/husky only
    /// work inside one.
    pub did_git_init: bool,
    /// Author for library manifests, usually the configured git name.
    pub author: Option<String>,
}

fn default_browserslist() -> Value {
    json!({
        "production": ["> 1%", "last 2 versions"],
        "development": [
            "last 1 chrome version",
            "last 1 firefox version",
            "last 1 safari version",
        ],
    })
}

/// Rewrite `package.json` in the project root per `opts` and strip the
/// config files of any tooling the manifest no longer references.
pub fn patch_manifest(root: &Path, opts: &PatchOptions<'_>) -> Result<()> {
    let manifest_path = root.join("package.json");
    let text = fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let mut manifest: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", manifest_path.display()))?;
    let package = manifest
        .as_object_mut()
        .context("package.json is not a JSON object")?;

    package.insert("name".into(), json!(opts.package_name));
    package.insert("version".into(), json!("0.1.0"));
    package.insert("private".into(), json!(true));
    package.insert("browserslist".into(), default_browserslist());

    if opts.is_library {
        package.remove("private");
        package.insert(
            "author".into(),
            json!(opts.author.clone().unwrap_or_default()),
        );
        package.insert(
            "main".into(),
            json!(format!("dist/{}.cjs.js", opts.project_name)),
        );
        package.insert(
            "module".into(),
            json!(format!("dist/{}.esm.js", opts.project_name)),
        );
        if opts.template_name.starts_with("react") {
            package.insert(
                "style".into(),
                json!(format!("dist/{}.css", opts.project_name)),
            );
        }
        if opts.is_scoped {
            package.insert("publishConfig".into(), json!({ "access": "public" }));
        }
    }

    if !opts.keep_eslint {
        remove_config_files(root, &[".eslint*"])?;
        package.remove("eslintConfig");
        remove_dev_dependencies(package, "eslint");
    }

    // husky installs git hooks on install and fails outside a git
    // repository; lint-staged is useless without ESLint or git.
    if !opts.keep_eslint || !opts.did_git_init {
        remove_config_files(root, &[".lintstaged*", ".lint-staged*"])?;
        package.remove("lint-staged");
        package.remove("husky");
        remove_dev_dependencies(package, "lint-staged");
        remove_dev_dependencies(package, "husky");
    }

    let mut out = serde_json::to_string_pretty(&manifest)?;
    out.push('\n');
    fs::write(&manifest_path, out)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;
    Ok(())
}

/// Drop every devDependency whose name contains `needle`.
fn remove_dev_dependencies(package: &mut serde_json::Map<String, Value>, needle: &str) {
    if let Some(deps) = package
        .get_mut("devDependencies")
        .and_then(Value::as_object_mut)
    {
        deps.retain(|name, _| !name.contains(needle));
    }
}

/// Delete top-level project entries matching any pattern. Patterns use
/// a leading `*` for suffix match or a trailing `*` for prefix match.
fn remove_config_files(root: &Path, patterns: &[&str]) -> Result<()> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("failed to list {}", root.display()))?;
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if !matches_any(&name, patterns) {
            continue;
        }
        let path = entry.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(())
}

fn matches_any(file_name: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| {
        if let Some(suffix) = pattern.strip_prefix('*') {
            file_name.ends_with(suffix)
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            file_name.starts_with(prefix)
        } else {
            file_name == *pattern
        }
    })
}
