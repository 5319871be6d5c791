//! stencil CLI - scaffold web projects from built-in and custom templates

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use stencil_core::registry::{RegistryError, TemplateRegistry, TemplateStore};
use stencil_core::tui::CreateArgs;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the template store location.
const STORE_PATH_ENV: &str = "STENCIL_CONFIG";

#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(about = "Scaffold web projects from built-in and custom templates")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new project from a template
    Create(CliCreateArgs),
    /// List available templates
    #[command(alias = "ls")]
    List,
    /// Add one custom template
    Add {
        /// Template name
        template: String,
        /// SSH remote of the template repository (git@host:owner/repo.git)
        repository: String,
        /// Short description shown by `list`
        description: Option<String>,
    },
    /// Delete one custom template
    Del {
        /// Template name
        template: String,
    },
}

#[derive(Parser, Debug)]
struct CliCreateArgs {
    /// Project directory to create
    name: String,

    /// Template name to use (skips the template prompt)
    #[arg(short, long)]
    template: Option<String>,

    /// Skip ESLint wiring in the generated project
    #[arg(long = "no-eslint")]
    no_eslint: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            template: args.template,
            no_eslint: args.no_eslint,
            yes: args.yes,
        }
    }
}

/// The store lives at `~/.stencilrc` unless the override env var says
/// otherwise; with no resolvable home directory it falls back to the
/// working directory.
fn store_path() -> PathBuf {
    std::env::var_os(STORE_PATH_ENV)
        .map(PathBuf::from)
        .or_else(TemplateStore::default_path)
        .unwrap_or_else(|| PathBuf::from(".stencilrc"))
}

/// Print the outcome of a registry mutation. Rejections (duplicate
/// name, protected built-in, malformed url, unknown entry) are user
/// feedback, not process failures.
fn report_registry_outcome(result: Result<(), RegistryError>, success: &str) -> Result<()> {
    match result {
        Ok(()) => {
            println!("{}", success);
            Ok(())
        }
        Err(RegistryError::SshUrlRequired) => {
            println!("{}", RegistryError::SshUrlRequired.to_string().red());
            Ok(())
        }
        Err(err) if err.is_rejection() => {
            println!("{}", err);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn list_templates(registry: &TemplateRegistry) {
    let all = registry.all();
    let label_text = "(custom)";
    let name_width = all.keys().map(|name| name.len()).max().unwrap_or(0) + 2;

    println!();
    for (name, entry) in &all {
        let label = if entry.custom { label_text } else { "" };
        println!(
            "{} {} {}",
            format!("{:>width$}", label, width = label_text.len()).cyan(),
            format!("{:-<width$}", format!("{} ", name), width = name_width),
            entry.url
        );
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let registry = TemplateRegistry::new(TemplateStore::new(store_path()));

    match args.command {
        Command::Create(create_args) => {
            let result = stencil_core::run_create(&registry, create_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Command::List => {
            list_templates(&registry);
            Ok(())
        }
        Command::Add {
            template,
            repository,
            description,
        } => report_registry_outcome(
            registry.add(&template, &repository, description.as_deref()),
            &format!("Added template \"{}\".", template),
        ),
        Command::Del { template } => report_registry_outcome(
            registry.del(&template),
            &format!("Deleted template \"{}\".", template),
        ),
    }
}
