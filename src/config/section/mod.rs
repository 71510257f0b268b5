//! Configuration section definitions.
//!
//! Each module corresponds to a section in `asset_compress.toml`:
//!
//! | Module    | TOML Section      | Purpose                              |
//! |-----------|-------------------|--------------------------------------|
//! | `paths`   | `[paths]`         | Document root and URL base           |
//! | `route`   | `[route]`         | Dynamic build endpoint               |
//! | `general` | `[general]`       | Concatenation switch                 |
//! | `kind`    | `[js]`, `[css]`   | Caching, cache dirs, URL prefixes    |

mod general;
mod kind;
mod paths;
mod route;

pub use general::GeneralConfig;
pub use kind::KindConfig;
pub use paths::PathsConfig;
pub use route::RouteConfig;
