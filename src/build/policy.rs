//! Resolution policy: serve a cached build or route to the dynamic builder.

use serde::Serialize;

use super::{CacheLocator, ConfigProvider, TargetRegistry};
use crate::asset::{AssetKind, TargetName};
use crate::debug;
use crate::error::{BuildError, Result};

/// Direct reference to a file the web server can serve as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticFile {
    pub kind: AssetKind,
    pub path: String,
}

/// Request for on-demand generation of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicRoute {
    pub kind: AssetKind,
    /// Registry key (`:hash-default.js` for content-addressed targets).
    pub target: String,
    /// Name the build is served under, fingerprint already expanded.
    pub name: String,
    pub source_files: Vec<String>,
    /// Defined at render time: the builder cannot know its files
    /// from configuration, so they travel with the route.
    pub runtime: bool,
}

/// Outcome of resolving one target (or one source file, in raw mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedReference {
    StaticFile(StaticFile),
    DynamicRoute(DynamicRoute),
    /// A single, unconcatenated source file.
    SourceFile(StaticFile),
}

impl ResolvedReference {
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::StaticFile(f) | Self::SourceFile(f) => f.kind,
            Self::DynamicRoute(r) => r.kind,
        }
    }

    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::DynamicRoute(_))
    }
}

/// Decides, per target, between the cached artifact and a dynamic build.
pub struct ResolutionPolicy<'a> {
    config: &'a dyn ConfigProvider,
    locator: CacheLocator<'a>,
}

impl<'a> ResolutionPolicy<'a> {
    pub fn new(config: &'a dyn ConfigProvider, locator: CacheLocator<'a>) -> Self {
        Self { config, locator }
    }

    /// True when `name` (a concrete build name) has to be generated on request.
    ///
    /// Caching disabled always means dynamic; otherwise dynamic until a
    /// build shows up on disk.
    pub fn should_use_dynamic_build(&self, name: &str) -> Result<bool> {
        let kind = self.config.kind_of(name)?;
        if !self.config.caching_enabled(kind) {
            return Ok(true);
        }
        Ok(self.locator.locate(name).is_none())
    }

    /// Resolve a target against the registry's current file list.
    pub fn resolve(&self, registry: &TargetRegistry<'_>, name: &TargetName) -> Result<ResolvedReference> {
        let kind = name.kind()?;
        let key = name.key();
        let files = registry.get_files(&key);
        if files.is_empty() {
            return Err(BuildError::unknown(key));
        }

        // Fingerprint over the files as they are now, not at registration
        let concrete = name.concrete(files);

        if self.config.caching_enabled(kind) {
            if let Some(artifact) = self.locator.locate(&concrete) {
                debug!("resolve"; "{} -> static {}", key, artifact.href);
                return Ok(ResolvedReference::StaticFile(StaticFile {
                    kind,
                    path: artifact.href,
                }));
            }
            debug!("resolve"; "{} -> dynamic (no cached build yet)", key);
        } else {
            debug!("resolve"; "{} -> dynamic (caching off for {})", key, kind);
        }

        Ok(ResolvedReference::DynamicRoute(DynamicRoute {
            kind,
            target: key.clone(),
            name: concrete,
            source_files: files.to_vec(),
            runtime: registry.is_runtime(&key),
        }))
    }
}
