//! Versioned build file names: `<stem>.v<digits>.<ext>`.
//!
//! An external build writes `app.v3.js` for cache busting; the logical
//! target stays `app.js`.

use std::sync::LazyLock;

use regex::Regex;

use super::AssetKind;

static VERSIONED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<stem>.+)\.v(?P<version>[0-9]+)\.(?P<ext>js|css)$")
        .expect("versioned name pattern is valid")
});

/// A parsed versioned file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedName<'a> {
    pub stem: &'a str,
    /// Version digits as written, of any length.
    pub version: &'a str,
    pub kind: AssetKind,
}

impl<'a> VersionedName<'a> {
    /// Parse a bare file name.
    pub fn parse(file_name: &'a str) -> Option<Self> {
        let caps = VERSIONED.captures(file_name)?;
        let stem = caps.name("stem")?.as_str();
        let version = caps.name("version")?.as_str();
        let kind = AssetKind::from_ext(caps.name("ext")?.as_str())?;
        Some(Self {
            stem,
            version,
            kind,
        })
    }

    /// Numeric ordering key: significant digit count, then the digits.
    ///
    /// `v03` and `v3` rank equal.
    pub fn rank(&self) -> (usize, &'a str) {
        let significant = self.version.trim_start_matches('0');
        (significant.len(), significant)
    }

    /// Whether this file is a versioned build of `target` (e.g. `app.js`).
    pub fn builds(&self, target: &str) -> bool {
        target
            .strip_suffix(self.kind.dotted_ext())
            .is_some_and(|stem| stem == self.stem)
    }
}

/// Glob pattern matching versioned builds of `target` in a directory listing.
///
/// `app.js` -> `app.v[0-9]*.js`. Candidates still need [`VersionedName::parse`],
/// since `[0-9]*` also admits non-digit tails.
pub fn glob_pattern(target: &str, kind: AssetKind) -> String {
    let stem = target.strip_suffix(kind.dotted_ext()).unwrap_or(target);
    format!("{}.v[0-9]*{}", glob::Pattern::escape(stem), kind.dotted_ext())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versioned() {
        let v = VersionedName::parse("app.v3.js").unwrap();
        assert_eq!(v.stem, "app");
        assert_eq!(v.version, "3");
        assert_eq!(v.kind, AssetKind::Script);
        assert!(v.builds("app.js"));
        assert!(!v.builds("app.css"));
        assert!(!v.builds("application.js"));
    }

    #[test]
    fn test_parse_dotted_stem() {
        let v = VersionedName::parse("jquery.ui.v1042.css").unwrap();
        assert_eq!(v.stem, "jquery.ui");
        assert_eq!(v.version, "1042");
        assert!(v.builds("jquery.ui.css"));
    }

    #[test]
    fn test_rank_is_numeric() {
        fn rank(name: &str) -> (usize, &str) {
            VersionedName::parse(name).unwrap().rank()
        }
        assert!(rank("app.v12.js") > rank("app.v9.js"));
        assert!(rank("app.v99999999999999999999.js") > rank("app.v18446744073709551615.js"));
        assert_eq!(rank("app.v03.js"), rank("app.v3.js"));
        assert_eq!(rank("app.v0.js"), rank("app.v000.js"));
    }

    #[test]
    fn test_parse_rejects_non_versioned() {
        assert!(VersionedName::parse("app.js").is_none());
        assert!(VersionedName::parse("app.v.js").is_none());
        assert!(VersionedName::parse("app.v3a.js").is_none());
        assert!(VersionedName::parse("app.v3.png").is_none());
        assert!(VersionedName::parse(".v3.js").is_none());
    }

    #[test]
    fn test_glob_pattern() {
        assert_eq!(glob_pattern("app.js", AssetKind::Script), "app.v[0-9]*.js");
        assert_eq!(glob_pattern("odd[1].css", AssetKind::Style), "odd[[]1[]].v[0-9]*.css");
    }
}
