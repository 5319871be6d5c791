//! Built-in template catalog
//!
//! Shipped with the tool and immutable at runtime. A custom entry can
//! never shadow a built-in name: `is_builtin` is the single predicate
//! behind the registry merge, the `add` guard, and the store's
//! write-time sweep.

/// A template bundled with the tool.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTemplate {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

/// The static catalog, read-only at runtime.
pub const BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        name: "pure-mpa",
        url: "https://github.com/stencil-templates/pure-mpa.git",
        description: "Multi-page application without a framework",
    },
    BuiltinTemplate {
        name: "react-mpa",
        url: "https://github.com/stencil-templates/react-mpa.git",
        description: "React multi-page application",
    },
    BuiltinTemplate {
        name: "react-spa",
        url: "https://github.com/stencil-templates/react-spa.git",
        description: "React single-page application",
    },
    BuiltinTemplate {
        name: "react-redux-spa",
        url: "https://github.com/stencil-templates/react-redux-spa.git",
        description: "React + Redux single-page application",
    },
    BuiltinTemplate {
        name: "react-library",
        url: "https://github.com/stencil-templates/react-library.git",
        description: "React component library",
    },
    BuiltinTemplate {
        name: "node-library",
        url: "https://github.com/stencil-templates/node-library.git",
        description: "Plain JavaScript library",
    },
];

/// Templates that scaffold a runnable application wired to the dev
/// server, as opposed to a publishable library.
pub const SERVICE_TEMPLATES: &[&str] = &["pure-mpa", "react-mpa", "react-spa", "react-redux-spa"];

/// Look up a built-in template by name.
pub fn find(name: &str) -> Option<&'static BuiltinTemplate> {
    BUILTIN_TEMPLATES.iter().find(|t| t.name == name)
}

/// Whether `name` belongs to the built-in catalog.
pub fn is_builtin(name: &str) -> bool {
    find(name).is_some()
}

/// Whether `name` is in the service-template allow-list.
pub fn is_service_template(name: &str) -> bool {
    SERVICE_TEMPLATES.contains(&name)
}

/// Whether `name` denotes a library template. The rule is a substring
/// match so it also classifies custom entries.
pub fn is_library_template(name: &str) -> bool {
    name.contains("library")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_are_unique() {
        for (i, a) in BUILTIN_TEMPLATES.iter().enumerate() {
            for b in &BUILTIN_TEMPLATES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_service_templates_are_builtin() {
        for name in SERVICE_TEMPLATES {
            assert!(is_builtin(name));
        }
    }

    #[test]
    fn test_library_rule_is_substring_based() {
        assert!(is_library_template("react-library"));
        assert!(is_library_template("my-library-fork"));
        assert!(!is_library_template("react-spa"));
    }
}
