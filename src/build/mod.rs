//! Build resolution: which file (or route) serves a build target.
//!
//! | Module      | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `provider`  | Configuration collaborator trait                |
//! | `fs`        | Filesystem probes (exists, list matching)       |
//! | `registry`  | Declared + runtime targets and their files      |
//! | `locator`   | Cached artifact lookup, versioned builds        |
//! | `policy`    | Static vs dynamic decision                      |
//! | `inclusion` | Per-render pending/consumed state               |
//! | `render`    | Render cycle facade tying the above together    |

mod fs;
mod inclusion;
mod locator;
mod policy;
mod provider;
mod registry;
mod render;

pub use fs::{DiskFs, FileSystem};
pub use inclusion::InclusionState;
pub use locator::{CacheLocator, CachedArtifact, web_path};
pub use policy::{DynamicRoute, ResolutionPolicy, ResolvedReference, StaticFile};
pub use provider::ConfigProvider;
pub use registry::{BuildTarget, TargetRegistry};
pub use render::{IncludeOptions, RenderCycle};
