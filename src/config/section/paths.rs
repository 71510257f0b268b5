//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! webroot = "webroot"   # document root (relative to the config file)
//! base = "/shop"        # URL the document root is served under
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath, util};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Document root. Cache paths under it map to URLs.
    pub webroot: PathBuf,

    /// URL base replacing the document root, empty for `/`.
    pub base: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            webroot: PathBuf::from("webroot"),
            base: String::new(),
        }
    }
}

impl PathsConfig {
    const BASE: FieldPath = FieldPath::new("paths.base");

    pub fn normalize(&mut self, root: &Path) {
        self.webroot = util::normalize_path(&root.join(&self.webroot));
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.base.is_empty() && !self.base.starts_with('/') {
            diag.error_with_hint(
                Self::BASE,
                format!("'{}' must start with '/'", self.base),
                format!("use \"/{}\"", self.base),
            );
        }
    }
}
