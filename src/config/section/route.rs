//! `[route]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [route]
//! build_url = ["asset_compress", "assets", "get"]  # dynamic build endpoint
//! prefixes = ["admin"]                             # host app namespaces
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::emit::DynamicRoutes;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Path segments of the dynamic build endpoint.
    pub build_url: Vec<String>,

    /// Extra leading path segments.
    pub prefixes: Vec<String>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            build_url: vec!["asset_compress".into(), "assets".into(), "get".into()],
            prefixes: Vec::new(),
        }
    }
}

impl RouteConfig {
    const BUILD_URL: FieldPath = FieldPath::new("route.build_url");
    const PREFIXES: FieldPath = FieldPath::new("route.prefixes");

    /// Route builder for this configuration.
    pub fn routes(&self) -> DynamicRoutes {
        DynamicRoutes::new(self.build_url.iter().cloned()).with_prefixes(self.prefixes.iter().cloned())
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.build_url.is_empty() {
            diag.error(Self::BUILD_URL, "must name at least one path segment");
        }
        Self::validate_segments(&self.build_url, Self::BUILD_URL, diag);
        Self::validate_segments(&self.prefixes, Self::PREFIXES, diag);
    }

    fn validate_segments(segments: &[String], field: FieldPath, diag: &mut ConfigDiagnostics) {
        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                diag.error(field, format!("[{i}] empty path segment"));
            } else if segment.contains('/') {
                diag.error_with_hint(
                    field,
                    format!("[{i}] '{segment}' contains '/'"),
                    "split it into separate segments",
                );
            }
        }
    }
}
