//! Asset Compress - build resolution for JavaScript and CSS targets.
//!
//! Decides, per render, whether a build target is served from a prebuilt
//! file in the cache directory or through the dynamic build route, and
//! tracks which targets a template has asked for but not yet included.
//!
//! | Module   | Purpose                                              |
//! |----------|------------------------------------------------------|
//! | `asset`  | Kinds, target names, fingerprints, versioned builds  |
//! | `build`  | Registry, cache locator, policy, render cycle        |
//! | `emit`   | Dynamic route URLs and HTML tags                     |
//! | `config` | `asset_compress.toml` loading and validation         |

pub mod asset;
pub mod build;
pub mod config;
pub mod emit;
pub mod error;
pub mod logger;

pub use asset::{AssetKind, TargetName};
pub use build::{
    CacheLocator, ConfigProvider, DiskFs, FileSystem, IncludeOptions, RenderCycle,
    ResolutionPolicy, ResolvedReference, TargetRegistry,
};
pub use config::AssetConfig;
pub use emit::{DynamicRoutes, HtmlTags, MarkupEmitter, RouteBuilder};
pub use error::{BuildError, Result};
