//! File discovery module with gitignore-aware filtering
//!
//! This module provides utilities for discovering source files in a project
//! directory while respecting .gitignore patterns. Results come back sorted
//! by path so repeated runs feed files to the collector in the same order.
//! Unlike a best-effort scan, any walk error aborts discovery.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Error, Result};
use crate::parser::Language;

/// Discover files matching glob patterns in a project directory
///
/// # Arguments
/// * `root` - Root directory to search
/// * `patterns` - Glob patterns (e.g., &["**/*.go", "cmd/**/*.go"])
///
/// # Returns
/// Sorted absolute paths of matching files, excluding those matched by
/// .gitignore. A missing root or an unreadable entry is an error.
///
/// # Example
/// ```no_run
/// use callflow_core::discovery;
///
/// let files = discovery::discover_files(std::path::Path::new("my_project"), &["**/*.go"])?;
/// println!("Found {} files", files.len());
/// # Ok::<(), callflow_core::Error>(())
/// ```
pub fn discover_files<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    // Canonicalize root upfront so all returned paths are absolute
    let canonical_root = root.canonicalize().map_err(|e| Error::io(root, e))?;

    let glob_matcher = build_glob_matcher(patterns)?;

    let mut files = Vec::new();
    for result in build_walker(&canonical_root) {
        let entry = result?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        // Match globs against the path relative to the root
        let matched = entry
            .path()
            .strip_prefix(&canonical_root)
            .is_ok_and(|rel_path| glob_matcher.is_match(rel_path));
        if matched {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Discover source files for the given languages (convenience wrapper)
///
/// # Example
/// ```no_run
/// use callflow_core::{discovery, Language};
///
/// let files = discovery::discover_language_files(
///     std::path::Path::new("my_project"),
///     &[Language::Go],
/// )?;
/// println!("Found {} Go files", files.len());
/// # Ok::<(), callflow_core::Error>(())
/// ```
pub fn discover_language_files(root: &Path, languages: &[Language]) -> Result<Vec<PathBuf>> {
    let patterns: Vec<String> = languages.iter().map(Language::glob).collect();
    discover_files(root, &patterns)
}

/// Build a glob matcher from the provided patterns
fn build_glob_matcher<S: AsRef<str>>(patterns: &[S]) -> Result<globset::GlobSet> {
    use globset::GlobSetBuilder;

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(globset::Glob::new(pattern.as_ref())?);
    }
    Ok(builder.build()?)
}

/// Build a WalkBuilder with proper ignore configuration
fn build_walker(root: &Path) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder
        .git_ignore(true)
        .git_exclude(true)
        .hidden(false)
        .parents(true); // Also check parent directories for .gitignore

    // Explicitly add .gitignore if it exists (outside a git repository
    // WalkBuilder does not pick it up on its own)
    let gitignore_path = root.join(".gitignore");
    if gitignore_path.exists() {
        if let Some(err) = builder.add_ignore(&gitignore_path) {
            // bad lines are skipped, the rest of the file still applies
            warn!(path = %gitignore_path.display(), error = %err, "malformed .gitignore");
        }
    }

    builder.build()
}
