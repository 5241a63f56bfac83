//! Path set utilities: pattern exclusion, option key checks and
//! relativizing file locations against a base directory.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexSet;
use regex::RegexSet;

use crate::error::{ConfigError, OperationError};

/// Predicate that holds for a string iff it matches none of the exclusion patterns.
///
/// Patterns use unanchored search, so `\.key` excludes `secrets/api.key`.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    set: RegexSet,
}

impl ExclusionFilter {
    /// Compile exclusion patterns. An empty list lets everything through.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = RegexSet::new(patterns)
            .map_err(|e| ConfigError::new("exclude", format!("Invalid pattern: {}", e)))?;
        Ok(Self { set })
    }

    /// True when `candidate` is clear of every pattern
    pub fn survives(&self, candidate: &str) -> bool {
        !self.set.is_match(candidate)
    }

    /// Get first matching pattern (for log messages)
    pub fn matching_pattern(&self, candidate: &str) -> Option<&str> {
        self.set
            .matches(candidate)
            .iter()
            .next()
            .map(|i| self.set.patterns()[i].as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Returns the candidates that match none of `patterns`, in their original order.
pub fn exclude_by_patterns<I, S>(
    candidates: &IndexSet<String>,
    patterns: I,
) -> Result<IndexSet<String>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let filter = ExclusionFilter::new(patterns)?;
    Ok(candidates
        .iter()
        .filter(|c| filter.survives(c))
        .cloned()
        .collect())
}

/// Fails if `options` holds any key outside `allowed`.
pub fn check_keys(
    options: &BTreeMap<String, String>,
    allowed: &[&str],
) -> Result<(), ConfigError> {
    let invalid: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed.contains(key))
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    Err(ConfigError::new(
        "options",
        format!(
            "Options contains invalid keys: {:?}; allowed keys: {:?}",
            invalid, allowed
        ),
    ))
}

/// Path of `file` relative to `base`, with `/` separators.
///
/// Both sides are made absolute first. Anything that does not sit strictly
/// below `base` (including `..` escapes and `base` itself) is rejected.
pub fn relative_path(file: &Path, base: &Path) -> Result<String, OperationError> {
    let file_abs = absolute(file);
    let base_abs = absolute(base);
    let unsafe_path = || OperationError::PathSafety {
        file: file.to_path_buf(),
        base: base.to_path_buf(),
    };

    let rel = file_abs.strip_prefix(&base_abs).map_err(|_| unsafe_path())?;

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            _ => return Err(unsafe_path()),
        }
    }
    if parts.is_empty() {
        return Err(unsafe_path());
    }

    Ok(parts.join("/"))
}

/// Convert file locations into a set of paths relative to `base`.
///
/// Duplicates collapse; first-seen order is kept.
pub fn make_filenames_relative<I, P>(
    files: I,
    base: &Path,
) -> Result<IndexSet<String>, OperationError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    files
        .into_iter()
        .map(|f| relative_path(f.as_ref(), base))
        .collect()
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
