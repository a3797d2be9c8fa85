//! Package-name extraction from changed paths.

use anyhow::Context;
use regex::Regex;

/// Selects formula/alias paths and pulls the package name out of them.
#[derive(Debug, Clone)]
pub struct PackageFilter {
    pattern: Regex,
}

impl PackageFilter {
    /// Compiles `pattern`; its first capture group must hold the package name.
    pub fn new(pattern: &str) -> anyhow::Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid package path pattern: {}", pattern))?;
        if pattern.captures_len() < 2 {
            anyhow::bail!(
                "Package path pattern {:?} has no capture group for the name",
                pattern.as_str()
            );
        }
        Ok(Self { pattern })
    }

    /// Package name for `path`, or `None` if the path is not a package file.
    #[must_use]
    pub fn package_name<'a>(&self, path: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Names in encounter order; duplicates are kept.
    #[must_use]
    pub fn package_names<S: AsRef<str>>(&self, paths: &[S]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|path| self.package_name(path.as_ref()))
            .map(str::to_string)
            .collect()
    }
}
