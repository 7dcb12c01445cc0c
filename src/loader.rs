//! File-backed route sources.
//!
//! The parser never touches the filesystem; this module is the thin adapter
//! that reads route files, in the order given, into [`RouteSource`]s.
//!
//! A path whose file name contains `*` or `?` is a pattern. It expands to the
//! matching files in its directory, sorted by path, and must match at least
//! one file. Patterns and plain paths keep the order the caller gave them.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::LoadError;
use crate::router::RequestMatcher;
use crate::rules::RouteSource;

impl RouteSource {
    /// Read one routes file; the path becomes the source name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "Read route source");
        Ok(RouteSource::new(path.display().to_string(), text))
    }
}

/// True when the file name part of `path` carries `*` or `?`.
#[must_use]
pub fn is_pattern(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains(['*', '?']))
}

/// Anchored regex for a file-name glob: `*` is any run, `?` one character.
pub(crate) fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut re = String::from("^");
    let mut literal = String::new();
    for c in glob.chars() {
        match c {
            '*' | '?' => {
                re.push_str(&regex::escape(&literal));
                literal.clear();
                re.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    re.push_str(&regex::escape(&literal));
    re.push('$');
    Regex::new(&re)
}

/// The directory a pattern lists; `.` when it has no parent.
#[must_use]
pub fn pattern_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn expand_pattern(pattern: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let name = pattern
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let re = glob_to_regex(name).map_err(|e| LoadError::Io {
        path: pattern.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, e),
    })?;

    let dir = pattern_dir(pattern);
    let mut matched = Vec::new();
    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| LoadError::Io {
            path: dir.clone(),
            source: io::Error::from(e),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(|n| re.is_match(n)) {
            matched.push(entry.into_path());
        }
    }

    if matched.is_empty() {
        return Err(LoadError::NoMatch {
            pattern: pattern.to_path_buf(),
        });
    }
    matched.sort();
    debug!(pattern = %pattern.display(), files = matched.len(), "Expanded route pattern");
    Ok(matched)
}

/// Expand file-name patterns into concrete paths.
///
/// Plain paths pass through untouched (a missing one fails later, on read).
pub fn expand_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>, LoadError> {
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        if is_pattern(path) {
            out.extend(expand_pattern(path)?);
        } else {
            out.push(path.to_path_buf());
        }
    }
    Ok(out)
}

/// Read several routes files, preserving their order.
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RouteSource>, LoadError> {
    expand_paths(paths)?
        .iter()
        .map(RouteSource::from_file)
        .collect()
}

impl RequestMatcher {
    /// Build a matcher from routes files.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, LoadError> {
        Self::from_sources(&load_sources(paths)?)
    }

    /// Re-read routes files and publish the result.
    ///
    /// Patterns are expanded again, so files added since the last load are
    /// picked up. A file that cannot be read aborts the reload just like a
    /// bad line.
    pub fn reload_from_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<usize, LoadError> {
        let sources = load_sources(paths)?;
        let count = self.reload(&sources)?;
        info!(files = sources.len(), routes_count = count, "Reloaded routes from files");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pattern_only_looks_at_file_name() {
        assert!(is_pattern(Path::new("conf/routes-*.conf")));
        assert!(is_pattern(Path::new("routes?")));
        assert!(!is_pattern(Path::new("conf/routes")));
        assert!(!is_pattern(Path::new("conf*/routes")));
    }

    #[test]
    fn test_glob_to_regex_escapes_literals() {
        let re = glob_to_regex("routes-*.conf").unwrap();
        assert!(re.is_match("routes-a.conf"));
        assert!(re.is_match("routes-.conf"));
        assert!(!re.is_match("routes-a.confx"));
        assert!(!re.is_match("routes-aXconf"));

        let re = glob_to_regex("r?.routes").unwrap();
        assert!(re.is_match("r1.routes"));
        assert!(!re.is_match("r12.routes"));
    }

    #[test]
    fn test_pattern_dir_defaults_to_current() {
        assert_eq!(pattern_dir(Path::new("*.routes")), PathBuf::from("."));
        assert_eq!(pattern_dir(Path::new("conf/*.routes")), PathBuf::from("conf"));
    }
}
