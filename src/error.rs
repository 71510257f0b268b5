//! Build resolution errors.

use thiserror::Error;

/// Errors raised while resolving a build target.
///
/// Optional inclusion of a target nobody populated is not an error;
/// only explicit resolution of a target without files is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("cannot create a tag for build target `{name}`: no source files are known")]
    UnknownBuildTarget { name: String },

    #[error("unsupported asset kind for `{name}`: expected a .js or .css extension")]
    UnsupportedAssetKind { name: String },
}

impl BuildError {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownBuildTarget { name: name.into() }
    }

    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedAssetKind { name: name.into() }
    }
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
