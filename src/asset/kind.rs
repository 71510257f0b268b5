//! Asset kind definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

/// Kind of build target, derived from the target name's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// `.js` build.
    Script,
    /// `.css` build.
    Style,
}

impl AssetKind {
    pub const ALL: [Self; 2] = [Self::Script, Self::Style];

    /// Extension without the leading dot.
    #[inline]
    pub const fn ext(self) -> &'static str {
        match self {
            Self::Script => "js",
            Self::Style => "css",
        }
    }

    /// Extension with the leading dot.
    #[inline]
    pub const fn dotted_ext(self) -> &'static str {
        match self {
            Self::Script => ".js",
            Self::Style => ".css",
        }
    }

    /// Slot used by per-kind arrays.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Script => 0,
            Self::Style => 1,
        }
    }

    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.') {
            "js" => Some(Self::Script),
            "css" => Some(Self::Style),
            _ => None,
        }
    }

    /// Derive the kind from a target name such as `default.js`.
    pub fn from_name(name: &str) -> Result<Self> {
        name.rsplit_once('.')
            .and_then(|(stem, ext)| if stem.is_empty() { None } else { Self::from_ext(ext) })
            .ok_or_else(|| BuildError::unsupported(name))
    }

    /// Append this kind's extension unless the name already ends with it.
    ///
    /// `default` -> `default.js`, `default.js` -> `default.js`
    pub fn ensure_ext(self, name: &str) -> String {
        if name.ends_with(self.dotted_ext()) {
            name.to_string()
        } else {
            format!("{name}{}", self.dotted_ext())
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(AssetKind::from_name("default.js"), Ok(AssetKind::Script));
        assert_eq!(AssetKind::from_name("themes/dark.css"), Ok(AssetKind::Style));
        assert_eq!(AssetKind::from_name("app.v3.js"), Ok(AssetKind::Script));
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert!(matches!(
            AssetKind::from_name("logo.png"),
            Err(BuildError::UnsupportedAssetKind { .. })
        ));
        assert!(AssetKind::from_name("default").is_err());
        assert!(AssetKind::from_name(".js").is_err());
    }

    #[test]
    fn test_ensure_ext_is_idempotent() {
        let once = AssetKind::Script.ensure_ext("default");
        assert_eq!(once, "default.js");
        assert_eq!(AssetKind::Script.ensure_ext(&once), "default.js");
        assert_eq!(AssetKind::Style.ensure_ext("reset.css"), "reset.css");
        // A different extension is not recognized as this kind's
        assert_eq!(AssetKind::Style.ensure_ext("reset.js"), "reset.js.css");
    }
}
