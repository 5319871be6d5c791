//! Persisted custom-template store
//!
//! A single TOML file, one table per template, owned exclusively by the
//! registry's add/delete operations. The path is injected at
//! construction so tests can point the store anywhere.

use crate::registry::builtin;
use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the default store under the user's home directory.
const STORE_FILE_NAME: &str = ".stencilrc";

/// A custom template as persisted on disk. Derived flags are never
/// stored; they are recomputed at registry-build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTemplate {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// On-disk store of user-registered templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default store location, `~/.stencilrc`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted custom set. A missing file is not an error:
    /// it reads as an empty mapping.
    pub fn read(&self) -> Result<BTreeMap<String, StoredTemplate>, RegistryError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| RegistryError::Read {
            path: self.path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| RegistryError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the store with `entries`. Keys colliding with a
    /// built-in name are stripped before serializing, independently of
    /// the add/delete guards, so stale or hand-edited entries cannot
    /// accumulate.
    pub fn write(&self, entries: &BTreeMap<String, StoredTemplate>) -> Result<(), RegistryError> {
        let sweep: BTreeMap<&String, &StoredTemplate> = entries
            .iter()
            .filter(|(name, _)| !builtin::is_builtin(name))
            .collect();
        let content = toml::to_string(&sweep)?;
        fs::write(&self.path, content).map_err(|source| RegistryError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stored(url: &str) -> StoredTemplate {
        StoredTemplate {
            url: url.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join(STORE_FILE_NAME));
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join(STORE_FILE_NAME));

        let mut entries = BTreeMap::new();
        entries.insert("foo".to_string(), stored("git@github.com:me/foo.git"));
        entries.insert(
            "bar".to_string(),
            StoredTemplate {
                url: "git@github.com:me/bar.git".to_string(),
                description: Some("bar template".to_string()),
            },
        );
        store.write(&entries).unwrap();

        assert_eq!(store.read().unwrap(), entries);
    }

    #[test]
    fn test_omitted_description_is_not_serialized() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join(STORE_FILE_NAME));

        let mut entries = BTreeMap::new();
        entries.insert("foo".to_string(), stored("git@github.com:me/foo.git"));
        store.write(&entries).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(!content.contains("description"));
    }

    #[test]
    fn test_write_strips_builtin_collisions() {
        let dir = tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join(STORE_FILE_NAME));

        let mut entries = BTreeMap::new();
        entries.insert("react-spa".to_string(), stored("git@github.com:me/evil.git"));
        entries.insert("mine".to_string(), stored("git@github.com:me/mine.git"));
        store.write(&entries).unwrap();

        let read_back = store.read().unwrap();
        assert_eq!(read_back.len(), 1);
        assert!(read_back.contains_key("mine"));
        assert!(!read_back.contains_key("react-spa"));
    }
}
