//! Filesystem probes used by the cache locator.
//!
//! Every call hits the disk: builds may appear between two requests, so
//! nothing is remembered across calls.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::debug;

/// Read-only filesystem access.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// Files directly inside `dir` whose name matches the glob `pattern`.
    ///
    /// Errors (missing directory, permissions) yield an empty list.
    fn list_matching(&self, dir: &Path, pattern: &str) -> Vec<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl FileSystem for DiskFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_matching(&self, dir: &Path, pattern: &str) -> Vec<PathBuf> {
        let pattern = match Pattern::new(pattern) {
            Ok(p) => p,
            Err(e) => {
                debug!("locate"; "invalid pattern `{}`: {}", pattern, e);
                return Vec::new();
            }
        };

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("locate"; "cannot list {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .filter(|e| e.file_name().to_str().is_some_and(|n| pattern.matches(n)))
            .map(|e| e.path())
            .collect()
    }
}
