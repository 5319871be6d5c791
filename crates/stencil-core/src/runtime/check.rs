//! Runtime detection for Node.js and npm

use anyhow::Result;
use semver::Version;
use std::fmt;
use std::process::Command;

/// Oldest Node.js release the generated projects support.
pub const MIN_NODE_VERSION: &str = "10.13.0";

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(binary: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", "npm")
}

/// Parse version string, handling the `v10.13.0` form node prints
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Gate project creation on the minimum supported Node.js release.
/// An unparseable version is let through; a missing runtime is not.
pub fn ensure_node_version(info: &RuntimeInfo) -> Result<()> {
    if !info.available {
        anyhow::bail!(
            "Node.js was not found. Generated projects require Node {} or newer.",
            MIN_NODE_VERSION
        );
    }
    let Some(found) = info.version.as_deref().and_then(|v| parse_version(v).ok()) else {
        return Ok(());
    };
    let minimum = Version::parse(MIN_NODE_VERSION).expect("minimum version is valid");
    if found < minimum {
        anyhow::bail!(
            "You are using Node {}, stencil requires Node {} or newer.\n\
             Please upgrade your Node version.",
            found,
            MIN_NODE_VERSION
        );
    }
    Ok(())
}

impl fmt::Display for RuntimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} ({})", self.name, version),
            None => write!(f, "{} (not installed)", self.name),
        }
    }
}
