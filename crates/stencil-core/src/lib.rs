//! Stencil Core - template registry and project scaffolding
//!
//! This library backs the `stencil` CLI. It is organized into layers:
//!
//! - **Registry** - built-in template catalog, persisted custom-template
//!   store, and the merged registry with add/delete operations
//! - **Scaffold** - project generation: template download, manifest
//!   patching, README generation, dependency installation
//! - **Runtime** - detection of the external tools the generated
//!   projects rely on (node, npm, git)
//! - **TUI** - optional cliclack-based prompt flow (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use stencil_core::registry::{TemplateRegistry, TemplateStore};
//!
//! let store = TemplateStore::new(TemplateStore::default_path().unwrap());
//! let registry = TemplateRegistry::new(store);
//! for (name, entry) in registry.all()? {
//!     println!("{} -> {}", name, entry.url);
//! }
//! ```

pub mod registry;
pub mod runtime;
pub mod scaffold;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use registry::{RegistryError, TemplateEntry, TemplateRegistry, TemplateStore};
pub use runtime::{check_node, check_npm, RuntimeInfo};
pub use scaffold::{install_dependencies, ProjectPaths};

#[cfg(feature = "tui")]
pub use tui::{run_create, CreateArgs};
