//! Charm-style CLI prompts using cliclack

use crate::registry::{TemplateEntry, TemplateRegistry};
use crate::runtime::{check, git};
use crate::scaffold::{self, download, manifest, naming, readme, ProjectPaths};
use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;

/// Arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create
    pub name: String,

    /// Template name to use (skips the template prompt)
    pub template: Option<String>,

    /// Skip ESLint wiring in the generated project
    pub no_eslint: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the create workflow with interactive prompts
pub async fn run_create(
    registry: &TemplateRegistry,
    args: CreateArgs,
    cli_version: &str,
) -> Result<()> {
    let paths = ProjectPaths::resolve(&args.name)?;

    if let Err(errors) = naming::validate_package_name(&paths.package_name) {
        let details: Vec<String> = errors.iter().map(|error| format!("  * {}", error)).collect();
        anyhow::bail!(
            "Cannot create a project called \"{}\" because of npm naming restrictions:\n{}",
            paths.package_name,
            details.join("\n")
        );
    }

    if paths.root.exists() {
        anyhow::bail!(
            "The directory \"{}\" already exists, please choose another name.",
            paths.root.display()
        );
    }

    cliclack::intro(format!("stencil v{}", cli_version))?;

    // Step 1: Node gate (hard); npm is only reported, install fails on
    // its own later if npm is genuinely absent
    let node = check::check_node();
    check::ensure_node_version(&node)?;
    cliclack::log::info(format!(
        "Detected runtimes: {}, {}",
        node,
        check::check_npm()
    ))?;

    // Step 2: Pick a template from the merged registry
    let all = registry.all();
    let (template_name, entry) = select_template(&all, &args)?;

    // Step 3: ESLint wiring?
    let eslint = if args.no_eslint {
        false
    } else if args.yes {
        true
    } else {
        cliclack::confirm("ESLint?").initial_value(true).interact()?
    };

    // Step 4: Download the template
    let spinner = cliclack::spinner();
    spinner.start("Downloading template...");
    match download::clone_template(&entry.url, &paths.root).await {
        Ok(()) => spinner.stop("Template downloaded"),
        Err(e) => {
            spinner.stop("Template download failed");
            return Err(e);
        }
    }

    cliclack::log::info(format!("Creating project in {}", paths.root.display()))?;

    // Step 5: git init when available
    let did_git_init = if git::has_git() {
        cliclack::log::info("Initializing git repository...")?;
        git::init(&paths.root)?;
        true
    } else {
        false
    };

    // Step 6: Patch the manifest for the new project
    let author = if entry.is_library {
        git::user_name()
    } else {
        None
    };
    manifest::patch_manifest(
        &paths.root,
        &manifest::PatchOptions {
            package_name: &paths.package_name,
            project_name: &paths.project_name,
            template_name: &template_name,
            is_library: entry.is_library,
            is_scoped: paths.is_scoped,
            keep_eslint: eslint,
            did_git_init,
            author,
        },
    )?;

    // Step 7: Install dependencies (installer output goes straight to
    // the terminal)
    cliclack::log::info("Installing project dependencies...")?;
    scaffold::install_dependencies(&paths.root).await?;

    // Step 8: README
    cliclack::log::info("Generating README.md...")?;
    readme::generate_readme(
        &paths.root,
        &paths.package_name,
        &paths.project_name,
        entry.has_service,
    )?;

    cliclack::log::success(format!(
        "Successfully created project {}",
        paths.project_name
    ))?;

    if entry.has_service {
        print_next_steps(&args.name);
    }

    // Step 9: First commit, or explain why there is none
    if !did_git_init {
        cliclack::log::warning(
            "lint-staged requires a git repository. After you install git and `git init`,\n\
             refer to https://github.com/okonet/lint-staged and reconfigure.",
        )?;
    } else if !git::initial_commit(&paths.root) {
        cliclack::log::warning(
            "Skipped git commit due to missing username and email in git config.\n\
             You will need to perform the initial commit yourself.",
        )?;
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn select_template(
    all: &BTreeMap<String, TemplateEntry>,
    args: &CreateArgs,
) -> Result<(String, TemplateEntry)> {
    if all.is_empty() {
        anyhow::bail!("No templates found.");
    }

    // --template picks directly
    if let Some(name) = args.template.as_deref() {
        match all.get(name) {
            Some(entry) => return Ok((name.to_string(), entry.clone())),
            None => {
                let available: Vec<&str> = all.keys().map(String::as_str).collect();
                anyhow::bail!(
                    "Template '{}' not found. Available templates: {}",
                    name,
                    available.join(", ")
                );
            }
        }
    }

    // --yes without --template takes the first entry
    if args.yes {
        let (name, entry) = all.iter().next().unwrap();
        cliclack::log::info(format!("Using template: {}", name))?;
        return Ok((name.clone(), entry.clone()));
    }

    // Build select prompt - use indices to avoid borrow issues
    let mut select = cliclack::select("Please pick a template");
    for (idx, (name, entry)) in all.iter().enumerate() {
        let hint = match (&entry.description, entry.custom) {
            (Some(description), true) => format!("{} (custom)", description),
            (Some(description), false) => description.clone(),
            (None, true) => "custom".to_string(),
            (None, false) => String::new(),
        };
        select = select.item(idx, name, hint);
    }

    let selected_idx: usize = select.interact()?;
    let (name, entry) = all.iter().nth(selected_idx).unwrap();
    Ok((name.clone(), entry.clone()))
}

fn print_next_steps(name: &str) {
    println!();
    println!("  Get started with the following commands:");
    println!();
    println!("    {} {}", "$".dimmed(), format!("cd {}", name).cyan());
    println!("    {} {}", "$".dimmed(), "npm start".cyan());
    println!();
}
