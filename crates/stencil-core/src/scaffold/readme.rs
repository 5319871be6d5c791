//! README generation for scaffolded projects

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;
use std::fs;
use std::path::Path;

/// README used for service templates, bundled with the tool.
const SERVICE_README_TEMPLATE: &str = include_str!("service_readme.md");

/// Write the project README. Service templates get the bundled service
/// README; other templates keep their own README (re-rendered in
/// place) or receive a minimal stub. Rendering substitutes `{{name}}`
/// and `{{projectName}}`.
pub fn generate_readme(
    root: &Path,
    package_name: &str,
    project_name: &str,
    has_service: bool,
) -> Result<()> {
    let readme_path = root.join("README.md");

    let source = if has_service {
        SERVICE_README_TEMPLATE.to_string()
    } else if readme_path.exists() {
        fs::read_to_string(&readme_path)
            .with_context(|| format!("failed to read {}", readme_path.display()))?
    } else {
        format!("# {}\n", package_name)
    };

    let rendered = Handlebars::new()
        .render_template(
            &source,
            &json!({ "name": package_name, "projectName": project_name }),
        )
        .context("failed to render README template")?;

    fs::write(&readme_path, rendered)
        .with_context(|| format!("failed to write {}", readme_path.display()))?;
    Ok(())
}
