//! Configuration collaborator consumed by the resolution core.

use std::path::Path;

use crate::asset::AssetKind;
use crate::error::Result;

/// Read-through source of declared targets and caching policy.
///
/// Implemented by [`crate::config::AssetConfig`]; tests use the same type
/// built from a TOML string.
pub trait ConfigProvider {
    /// Declared source files of a target, empty when unknown.
    fn files_for(&self, target: &str) -> &[String];

    /// Whether static cached builds may be served for this kind.
    fn caching_enabled(&self, kind: AssetKind) -> bool;

    /// Directory holding cached builds, `None` when caching is off.
    fn cache_dir(&self, kind: AssetKind) -> Option<&Path>;

    /// URL prepended to every concatenated build href.
    fn base_url_for(&self, kind: AssetKind) -> Option<&str>;

    /// URL prefix for individual source files (raw mode).
    fn source_url_for(&self, kind: AssetKind) -> Option<&str>;

    /// Document root stripped from cache paths to produce web paths.
    fn document_root(&self) -> &Path;

    /// URL base that replaces the document root.
    fn base_path(&self) -> &str;

    /// When false, includes emit one reference per source file.
    fn concatenate(&self) -> bool {
        true
    }

    fn kind_of(&self, target: &str) -> Result<AssetKind> {
        AssetKind::from_name(target)
    }
}
