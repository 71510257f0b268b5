//! Build target names.
//!
//! A name is either chosen by the caller (`default.js`) or derived from the
//! target's files at resolution time (`:hash-default.js`).

use std::fmt;

use super::{AssetKind, fingerprint};
use crate::error::Result;

/// Placeholder token marking a content-addressed target.
pub const HASH_TOKEN: &str = ":hash";

/// Label used when `add_script`/`add_css` are called without a target.
pub const DEFAULT_LABEL: &str = "default";

/// A build target name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetName {
    /// Caller-chosen name, always carrying its extension.
    Named(String),
    /// Name derived from a fingerprint of the target's files.
    ContentAddressed { label: String, kind: AssetKind },
}

impl TargetName {
    /// Parse a target name, appending `kind`'s extension when missing.
    pub fn parse(raw: &str, kind: AssetKind) -> Self {
        let name = kind.ensure_ext(raw);
        match name.strip_prefix(HASH_TOKEN) {
            Some(rest) => {
                let label = rest
                    .strip_suffix(kind.dotted_ext())
                    .unwrap_or(rest)
                    .trim_start_matches('-');
                Self::ContentAddressed {
                    label: if label.is_empty() {
                        DEFAULT_LABEL.to_string()
                    } else {
                        label.to_string()
                    },
                    kind,
                }
            }
            None => Self::Named(name),
        }
    }

    /// Parse a name that already carries its extension.
    pub fn from_full(raw: &str) -> Result<Self> {
        let kind = AssetKind::from_name(raw)?;
        Ok(Self::parse(raw, kind))
    }

    /// Content-addressed name with the default label.
    pub fn hashed(kind: AssetKind) -> Self {
        Self::ContentAddressed {
            label: DEFAULT_LABEL.to_string(),
            kind,
        }
    }

    pub fn kind(&self) -> Result<AssetKind> {
        match self {
            Self::Named(name) => AssetKind::from_name(name),
            Self::ContentAddressed { kind, .. } => Ok(*kind),
        }
    }

    pub const fn is_content_addressed(&self) -> bool {
        matches!(self, Self::ContentAddressed { .. })
    }

    /// Registry key (`default.js`, `:hash-default.js`).
    pub fn key(&self) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::ContentAddressed { label, kind } => {
                format!("{HASH_TOKEN}-{label}{}", kind.dotted_ext())
            }
        }
    }

    /// The name a build of `files` is served under.
    pub fn concrete<S: AsRef<str>>(&self, files: &[S]) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::ContentAddressed { kind, .. } => {
                format!("{}{}", fingerprint(files), kind.dotted_ext())
            }
        }
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
