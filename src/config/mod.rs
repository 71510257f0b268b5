//! Asset configuration management for `asset_compress.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [paths], [route], [general], [js], [css]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # path normalization, config discovery
//! └── mod.rs         # AssetConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[paths]`        | Document root and URL base                     |
//! | `[route]`        | Dynamic build endpoint segments and prefixes   |
//! | `[general]`      | Concatenation switch                           |
//! | `[js]`, `[css]`  | Caching, cache directory, base/source URLs     |
//! | `[targets]`      | Declared build targets → source files          |

pub mod section;
pub mod types;
pub mod util;

pub use section::{GeneralConfig, KindConfig, PathsConfig, RouteConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::asset::{AssetKind, HASH_TOKEN};
use crate::build::ConfigProvider;
use crate::emit::DynamicRoutes;
use crate::log;

/// Default config file name.
pub const CONFIG_FILE: &str = "asset_compress.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing asset_compress.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub paths: PathsConfig,

    pub route: RouteConfig,

    pub general: GeneralConfig,

    pub js: KindConfig,

    pub css: KindConfig,

    /// Declared build targets, in declaration order.
    pub targets: IndexMap<String, Vec<String>>,
}

impl AssetConfig {
    const TARGETS: FieldPath = FieldPath::new("targets");

    /// Load, normalize and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_path(path)?;

        config.config_path = util::normalize_path(path);
        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.normalize_paths(&root);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Section of one asset kind.
    pub fn kind(&self, kind: AssetKind) -> &KindConfig {
        match kind {
            AssetKind::Script => &self.js,
            AssetKind::Style => &self.css,
        }
    }

    /// Route builder for the dynamic build endpoint.
    pub fn routes(&self) -> DynamicRoutes {
        self.route.routes()
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    pub fn normalize_paths(&mut self, root: &Path) {
        let root = util::normalize_path(root);
        self.paths.normalize(&root);
        self.js.normalize(&root);
        self.css.normalize(&root);
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration after normalization.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.paths.validate(&mut diag);
        self.route.validate(&mut diag);
        for kind in AssetKind::ALL {
            self.kind(kind).validate(kind, &self.paths.webroot, &mut diag);
        }
        self.validate_targets(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    fn validate_targets(&self, diag: &mut ConfigDiagnostics) {
        for (name, files) in &self.targets {
            if name.starts_with(HASH_TOKEN) {
                diag.error(
                    Self::TARGETS,
                    format!("'{name}': names starting with '{HASH_TOKEN}' are reserved for runtime targets"),
                );
            } else if AssetKind::from_name(name).is_err() {
                diag.error_with_hint(
                    Self::TARGETS,
                    format!("'{name}' has no .js or .css extension"),
                    format!("use \"{name}.js\" or \"{name}.css\""),
                );
            }
            if files.is_empty() {
                diag.error(Self::TARGETS, format!("'{name}' lists no source files"));
            }
        }
    }
}

impl ConfigProvider for AssetConfig {
    fn files_for(&self, target: &str) -> &[String] {
        self.targets.get(target).map(Vec::as_slice).unwrap_or_default()
    }

    fn caching_enabled(&self, kind: AssetKind) -> bool {
        self.kind(kind).caching_on()
    }

    fn cache_dir(&self, kind: AssetKind) -> Option<&Path> {
        self.kind(kind).cache_dir.as_deref()
    }

    fn base_url_for(&self, kind: AssetKind) -> Option<&str> {
        self.kind(kind).base_url.as_deref()
    }

    fn source_url_for(&self, kind: AssetKind) -> Option<&str> {
        self.kind(kind).source_url.as_deref()
    }

    fn document_root(&self) -> &Path {
        &self.paths.webroot
    }

    fn base_path(&self) -> &str {
        &self.paths.base
    }

    fn concatenate(&self) -> bool {
        self.general.concatenate
    }
}

// ============================================================================
// tests
// ============================================================================
