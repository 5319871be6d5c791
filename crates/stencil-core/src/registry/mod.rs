//! Template registry
//!
//! Overlays user-registered templates from the persisted store on top
//! of the built-in catalog. The merged view is recomputed on every
//! read; each CLI invocation is a fresh process, so nothing is cached.

pub mod builtin;
pub mod store;

pub use store::{StoredTemplate, TemplateStore};

use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;
use thiserror::Error;

/// SSH remote form required for custom template repositories,
/// `git@host:owner/repo.git`.
static SSH_REMOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git@([^:]+):([^/]+)/.*\.git$").expect("pattern is valid"));

/// Whether `url` is an acceptable custom-template repository locator.
pub fn is_ssh_repository_url(url: &str) -> bool {
    SSH_REMOTE.is_match(url)
}

/// A resolved registry entry. The classification flags are derived at
/// merge time and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub url: String,
    pub description: Option<String>,
    /// True only for entries that survived from the persisted store.
    pub custom: bool,
    /// Scaffolds a runnable application (dev-server next steps apply).
    pub has_service: bool,
    /// Publishable library rather than an application.
    pub is_library: bool,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("The template \"{0}\" already exists.")]
    AlreadyExists(String),

    #[error("Repository url must be an SSH remote (git@host:owner/repo.git).")]
    SshUrlRequired,

    #[error("The built-in template \"{0}\" cannot be deleted.")]
    BuiltinProtected(String),

    #[error("The template \"{0}\" does not exist.")]
    NotFound(String),

    #[error("failed to read template store at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write template store at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template store at {path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize template store: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl RegistryError {
    /// Rejected operations are user feedback, not failures: the CLI
    /// prints the message and exits cleanly without mutating anything.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RegistryError::AlreadyExists(_)
                | RegistryError::SshUrlRequired
                | RegistryError::BuiltinProtected(_)
                | RegistryError::NotFound(_)
        )
    }
}

/// The merged template registry backed by a persisted store.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    store: TemplateStore,
}

impl TemplateRegistry {
    pub fn new(store: TemplateStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Every available template, built-ins overlaid with the custom
    /// set. On a name collision the built-in definition wins unchanged.
    /// A missing or unreadable store degrades to an empty custom set;
    /// only mutations surface store errors.
    pub fn all(&self) -> BTreeMap<String, TemplateEntry> {
        let mut all = BTreeMap::new();
        for template in builtin::BUILTIN_TEMPLATES {
            all.insert(
                template.name.to_string(),
                TemplateEntry {
                    url: template.url.to_string(),
                    description: Some(template.description.to_string()),
                    custom: false,
                    has_service: builtin::is_service_template(template.name),
                    is_library: builtin::is_library_template(template.name),
                },
            );
        }
        for (name, stored) in self.store.read().unwrap_or_default() {
            if builtin::is_builtin(&name) {
                continue;
            }
            let entry = TemplateEntry {
                url: stored.url,
                description: stored.description,
                custom: true,
                has_service: builtin::is_service_template(&name),
                is_library: builtin::is_library_template(&name),
            };
            all.insert(name, entry);
        }
        all
    }

    /// Look up a single template by name in the merged view.
    pub fn get(&self, name: &str) -> Option<TemplateEntry> {
        self.all().remove(name)
    }

    /// Register a custom template. Rejects names already present in
    /// either set and repository locators that are not SSH remotes.
    pub fn add(
        &self,
        name: &str,
        url: &str,
        description: Option<&str>,
    ) -> Result<(), RegistryError> {
        let mut custom = self.store.read()?;
        if builtin::is_builtin(name) || custom.contains_key(name) {
            return Err(RegistryError::AlreadyExists(name.to_string()));
        }
        if !is_ssh_repository_url(url) {
            return Err(RegistryError::SshUrlRequired);
        }
        custom.insert(
            name.to_string(),
            StoredTemplate {
                url: url.to_string(),
                description: description.map(str::to_string),
            },
        );
        self.store.write(&custom)
    }

    /// Remove a custom template. Built-ins are protected.
    pub fn del(&self, name: &str) -> Result<(), RegistryError> {
        if builtin::is_builtin(name) {
            return Err(RegistryError::BuiltinProtected(name.to_string()));
        }
        let mut custom = self.store.read()?;
        if custom.remove(name).is_none() {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        self.store.write(&custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const SSH_URL: &str = "git@github.com:me/foo.git";

    fn registry_in(dir: &TempDir) -> TemplateRegistry {
        TemplateRegistry::new(TemplateStore::new(dir.path().join("stencilrc")))
    }

    #[test]
    fn test_missing_store_yields_exactly_the_builtin_catalog() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);

        let all = registry.all();
        assert_eq!(all.len(), builtin::BUILTIN_TEMPLATES.len());
        for template in builtin::BUILTIN_TEMPLATES {
            let entry = &all[template.name];
            assert_eq!(entry.url, template.url);
            assert_eq!(entry.description.as_deref(), Some(template.description));
            assert!(!entry.custom);
        }
    }

    #[test]
    fn test_derived_flags() {
        let dir = tempdir().unwrap();
        let all = registry_in(&dir).all();

        assert!(all["react-spa"].has_service);
        assert!(!all["react-spa"].is_library);
        assert!(all["react-library"].is_library);
        assert!(!all["react-library"].has_service);
    }

    #[test]
    fn test_add_and_delete_round_trip() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);

        registry.add("foo", SSH_URL, Some("my template")).unwrap();
        let entry = registry.get("foo").unwrap();
        assert_eq!(entry.url, SSH_URL);
        assert_eq!(entry.description.as_deref(), Some("my template"));
        assert!(entry.custom);

        registry.del("foo").unwrap();
        assert!(registry.get("foo").is_none());
        assert!(registry.store().read().unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_existing_names() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);

        let err = registry.add("react-spa", SSH_URL, None).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists(_)));
        // A rejected add must not create the store file.
        assert!(!registry.store().path().exists());

        registry.add("foo", SSH_URL, None).unwrap();
        let err = registry
            .add("foo", "git@github.com:me/other.git", None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists(_)));
    }

    #[test]
    fn test_add_rejects_non_ssh_urls() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);

        let err = registry
            .add("foo", "https://github.com/me/foo.git", None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::SshUrlRequired));
        assert!(!registry.store().path().exists());
    }

    #[test]
    fn test_ssh_url_validation() {
        assert!(is_ssh_repository_url("git@github.com:me/foo.git"));
        assert!(is_ssh_repository_url("git@git.corp.net:team/deep/repo.git"));
        assert!(!is_ssh_repository_url("https://github.com/me/foo.git"));
        assert!(!is_ssh_repository_url("git@github.com:foo.git"));
        assert!(!is_ssh_repository_url("git@github.com:me/foo"));
        assert!(!is_ssh_repository_url("ssh://git@github.com/me/foo.git"));
    }

    #[test]
    fn test_delete_builtin_is_protected_and_store_untouched() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        registry.add("foo", SSH_URL, None).unwrap();
        let before = fs::read_to_string(registry.store().path()).unwrap();

        for template in builtin::BUILTIN_TEMPLATES {
            let err = registry.del(template.name).unwrap_err();
            assert!(matches!(err, RegistryError::BuiltinProtected(_)));
        }

        let after = fs::read_to_string(registry.store().path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_delete_missing_custom_entry() {
        let dir = tempdir().unwrap();
        let err = registry_in(&dir).del("nope").unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn test_builtin_wins_over_colliding_store_entry() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);

        // Seed the store behind the registry's back, as a stale or
        // hand-edited file would.
        fs::write(
            registry.store().path(),
            "[react-spa]\nurl = \"git@github.com:me/evil.git\"\n\
             [mine]\nurl = \"git@github.com:me/mine.git\"\n",
        )
        .unwrap();

        let all = registry.all();
        let spa = &all["react-spa"];
        let catalog = builtin::find("react-spa").unwrap();
        assert_eq!(spa.url, catalog.url);
        assert_eq!(spa.description.as_deref(), Some(catalog.description));
        assert!(!spa.custom);
        assert!(all["mine"].custom);

        // The next write sweeps the colliding key out of the file.
        registry.add("other", SSH_URL, None).unwrap();
        let content = fs::read_to_string(registry.store().path()).unwrap();
        assert!(!content.contains("react-spa"));
        assert!(content.contains("[mine]"));
    }

    #[test]
    fn test_rejections_are_classified() {
        assert!(RegistryError::AlreadyExists("x".into()).is_rejection());
        assert!(RegistryError::SshUrlRequired.is_rejection());
        assert!(RegistryError::BuiltinProtected("x".into()).is_rejection());
        assert!(RegistryError::NotFound("x".into()).is_rejection());

        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        fs::write(registry.store().path(), "not = [valid").unwrap();
        assert!(!registry.store().read().unwrap_err().is_rejection());
    }

    #[test]
    fn test_corrupt_store_degrades_to_builtins_on_read() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        fs::write(registry.store().path(), "not = [valid").unwrap();

        let all = registry.all();
        assert_eq!(all.len(), builtin::BUILTIN_TEMPLATES.len());
        // Mutations refuse to touch a store they cannot read.
        assert!(registry.add("foo", SSH_URL, None).is_err());
    }
}
