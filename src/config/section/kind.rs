//! `[js]` / `[css]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [js]
//! caching = true                         # serve prebuilt files when present
//! cache_dir = "webroot/cache_js"         # where the build writes them
//! base_url = "https://cdn.example.com"   # prepended to build hrefs
//! source_url = "/js/"                    # prefix for raw per-file hrefs
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::asset::AssetKind;
use crate::config::{ConfigDiagnostics, FieldPath, util};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KindConfig {
    /// Serve cached builds when they exist.
    pub caching: bool,

    /// Cache directory (relative to the config file).
    pub cache_dir: Option<PathBuf>,

    /// URL prepended to every build href.
    pub base_url: Option<String>,

    /// URL prefix for individual source files. Defaults to `/<ext>/`.
    pub source_url: Option<String>,
}

/// Field paths of one kind section.
struct KindFields {
    caching: FieldPath,
    cache_dir: FieldPath,
    base_url: FieldPath,
    source_url: FieldPath,
}

const fn fields(kind: AssetKind) -> KindFields {
    match kind {
        AssetKind::Script => KindFields {
            caching: FieldPath::new("js.caching"),
            cache_dir: FieldPath::new("js.cache_dir"),
            base_url: FieldPath::new("js.base_url"),
            source_url: FieldPath::new("js.source_url"),
        },
        AssetKind::Style => KindFields {
            caching: FieldPath::new("css.caching"),
            cache_dir: FieldPath::new("css.cache_dir"),
            base_url: FieldPath::new("css.base_url"),
            source_url: FieldPath::new("css.source_url"),
        },
    }
}

impl KindConfig {
    /// Caching needs both the flag and somewhere to look.
    pub fn caching_on(&self) -> bool {
        self.caching && self.cache_dir.is_some()
    }

    /// Resolve the cache directory against the project root.
    pub fn normalize(&mut self, root: &Path) {
        if let Some(dir) = self.cache_dir.take() {
            self.cache_dir = Some(util::normalize_path(&root.join(dir)));
        }
    }

    /// Validate after normalization.
    pub fn validate(&self, kind: AssetKind, webroot: &Path, diag: &mut ConfigDiagnostics) {
        let fields = fields(kind);

        match &self.cache_dir {
            None if self.caching => diag.warn(
                fields.caching,
                "caching is on but no cache_dir is set, builds are always dynamic",
            ),
            Some(dir) if !dir.starts_with(webroot) => diag.warn(
                fields.cache_dir,
                format!(
                    "'{}' is outside the document root, cached builds cannot be mapped to URLs",
                    dir.display()
                ),
            ),
            Some(dir) if self.caching && !dir.is_dir() => diag.warn(
                fields.cache_dir,
                format!("'{}' does not exist yet", dir.display()),
            ),
            _ => {}
        }

        for (field, value) in [
            (fields.base_url, &self.base_url),
            (fields.source_url, &self.source_url),
        ] {
            if let Some(url) = value
                && !util::is_url_like(url)
            {
                diag.error_with_hint(
                    field,
                    format!("'{url}' is neither an absolute URL nor an absolute path"),
                    "use e.g. \"https://cdn.example.com\" or \"/static\"",
                );
            }
        }
    }
}
