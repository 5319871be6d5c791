//! Package-name validation for generated projects
//!
//! Mirrors the npm registry's naming restrictions so a freshly
//! scaffolded project can be published without a rename.

/// Maximum length the npm registry accepts for a package name.
const MAX_NAME_LENGTH: usize = 214;

/// Whether `name` is of the scoped form `@scope/pkg`.
pub fn is_scoped_package(name: &str) -> bool {
    name.strip_prefix('@')
        .and_then(|rest| rest.split_once('/'))
        .is_some_and(|(scope, pkg)| !scope.is_empty() && !pkg.is_empty())
}

/// Validate a package name against npm naming restrictions. Returns
/// every violated rule so the caller can report them all at once.
pub fn validate_package_name(name: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push("name length must be greater than zero".to_string());
        return Err(errors);
    }
    if name.trim() != name {
        errors.push("name cannot contain leading or trailing spaces".to_string());
    }
    if name.starts_with('.') {
        errors.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        errors.push("name cannot start with an underscore".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        errors.push(format!(
            "name cannot contain more than {} characters",
            MAX_NAME_LENGTH
        ));
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("name cannot contain capital letters".to_string());
    }

    let bare = match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((scope, pkg)) => {
            if scope.is_empty() || pkg.is_empty() {
                errors.push("scoped name must be of the form @scope/name".to_string());
            }
            [scope, pkg]
        }
        None => [name, ""],
    };
    if bare
        .iter()
        .any(|part| !part.chars().all(is_url_friendly_char))
    {
        errors.push("name can only contain URL-friendly characters".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_url_friendly_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_are_accepted() {
        for name in ["my-app", "app2", "some.package", "a"] {
            assert!(validate_package_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_scoped_names_are_accepted() {
        assert!(is_scoped_package("@me/app"));
        assert!(!is_scoped_package("me/app"));
        assert!(!is_scoped_package("@/app"));
        assert!(validate_package_name("@me/my-app").is_ok());
    }

    #[test]
    fn test_rejected_names() {
        for name in [".hidden", "_private", "My-App", "has space", "emoji-\u{1f600}"] {
            assert!(validate_package_name(name).is_err(), "{name}");
        }
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name(&"a".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_all_violations_are_reported() {
        let errors = validate_package_name("_Bad Name").unwrap_err();
        assert!(errors.len() >= 3);
    }
}
