//! Cache locator: find a prebuilt artifact for a target on disk.
//!
//! Lookup order inside the kind's cache directory:
//! 1. exact name (`app.js`)
//! 2. versioned builds (`app.v<digits>.js`), highest version wins

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::{ConfigProvider, FileSystem};
use crate::asset::{AssetKind, VersionedName, versioned};
use crate::debug;

/// A prebuilt file that satisfies a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedArtifact {
    /// Location on disk.
    pub path: PathBuf,
    /// Web-servable path (document root replaced by the base path).
    pub href: String,
    /// Version digits for `name.vNNN.ext` builds.
    pub version: Option<String>,
}

pub struct CacheLocator<'a> {
    config: &'a dyn ConfigProvider,
    fs: &'a dyn FileSystem,
}

impl<'a> CacheLocator<'a> {
    pub fn new(config: &'a dyn ConfigProvider, fs: &'a dyn FileSystem) -> Self {
        Self { config, fs }
    }

    /// Locate the cached build for `target` (a concrete name like `app.js`).
    ///
    /// Returns `None` when no cache directory is configured for the kind,
    /// when the name has no recognized kind, or when nothing is on disk.
    pub fn locate(&self, target: &str) -> Option<CachedArtifact> {
        let kind = AssetKind::from_name(target).ok()?;
        let cache_dir = self.config.cache_dir(kind)?;

        let target_path = Path::new(target);
        if !target_path.components().all(|c| matches!(c, Component::Normal(_))) {
            debug!("locate"; "{} escapes the cache directory, ignoring", target);
            return None;
        }
        let file_name = target_path.file_name()?.to_str()?;
        let dir = match target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => cache_dir.join(parent),
            _ => cache_dir.to_path_buf(),
        };

        let exact = dir.join(file_name);
        if self.fs.exists(&exact) {
            debug!("locate"; "{} -> {}", target, exact.display());
            return Some(self.artifact(exact, None));
        }

        let (version, path) = self.find_versioned(&dir, file_name, kind)?;
        debug!("locate"; "{} -> {} (v{})", target, path.display(), version);
        Some(self.artifact(path, Some(version)))
    }

    /// Highest-versioned build of `file_name` in `dir`.
    ///
    /// Directory order is not stable across platforms, so candidates are
    /// ranked by version number, then by file name. Versions compare as
    /// digit strings and may exceed any integer width.
    fn find_versioned(&self, dir: &Path, file_name: &str, kind: AssetKind) -> Option<(String, PathBuf)> {
        let pattern = versioned::glob_pattern(file_name, kind);

        self.fs
            .list_matching(dir, &pattern)
            .into_iter()
            .filter_map(|path| {
                let build = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(VersionedName::parse)
                    .filter(|v| v.builds(file_name))?;
                let (digits, significant) = build.rank();
                let rank = (digits, significant.to_string());
                let version = build.version.to_string();
                Some((rank, version, path))
            })
            .max_by(|(ra, _, pa), (rb, _, pb)| {
                ra.cmp(rb).then_with(|| pa.file_name().cmp(&pb.file_name()))
            })
            .map(|(_, version, path)| (version, path))
    }

    fn artifact(&self, path: PathBuf, version: Option<String>) -> CachedArtifact {
        let href = web_path(&path, self.config.document_root(), self.config.base_path());
        CachedArtifact {
            path,
            href,
            version,
        }
    }
}

/// Translate a path under the document root into a URL path.
///
/// `<root>/cache_js/app.js` with base `/shop` -> `/shop/cache_js/app.js`.
/// Paths outside the root are a configuration error; they pass through as-is.
pub fn web_path(path: &Path, document_root: &Path, base: &str) -> String {
    match path.strip_prefix(document_root) {
        Ok(rel) => {
            let rel = rel.to_string_lossy().replace('\\', "/");
            format!("{}/{}", base.trim_end_matches('/'), rel)
        }
        Err(_) => {
            debug!("locate"; "{} is outside document root {}", path.display(), document_root.display());
            path.to_string_lossy().into_owned()
        }
    }
}
