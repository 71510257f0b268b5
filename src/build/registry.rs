//! Target registry: build target name → ordered source files.
//!
//! Declared targets come from the configuration and are read through on
//! demand. Runtime targets are layered on top during a render; adding files
//! to a declared name copies its declared list first, then merges.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use super::ConfigProvider;
use crate::asset::{AssetKind, TargetName};
use crate::error::Result;

/// A build target known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub name: TargetName,
    pub kind: AssetKind,
    /// Concatenation order, no duplicates.
    pub source_files: Vec<String>,
    /// Defined during the current render rather than in configuration.
    pub is_runtime: bool,
}

impl BuildTarget {
    /// Append files not yet present, keeping first-seen order.
    fn merge<I, S>(&mut self, files: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: FxHashSet<String> = self.source_files.iter().cloned().collect();
        for file in files {
            let file = file.into();
            if seen.insert(file.clone()) {
                self.source_files.push(file);
            }
        }
    }
}

/// Registry of build targets for one render cycle.
pub struct TargetRegistry<'c> {
    config: &'c dyn ConfigProvider,
    targets: IndexMap<String, BuildTarget>,
}

impl<'c> TargetRegistry<'c> {
    pub fn new(config: &'c dyn ConfigProvider) -> Self {
        Self {
            config,
            targets: IndexMap::new(),
        }
    }

    /// Ordered files of a target, empty when unknown.
    pub fn get_files(&self, key: &str) -> &[String] {
        match self.targets.get(key) {
            Some(target) => target.source_files.as_slice(),
            None => self.config.files_for(key),
        }
    }

    pub fn is_runtime(&self, key: &str) -> bool {
        self.targets.get(key).is_some_and(|t| t.is_runtime)
    }

    /// Declare files for a target, merging onto whatever is already known.
    pub fn set_files<I, S>(&mut self, name: &TargetName, files: I) -> Result<&mut BuildTarget>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kind = name.kind()?;
        let key = name.key();
        let config = self.config;
        let declared = config.files_for(&key);

        let target = self.targets.entry(key).or_insert_with(|| {
            let mut target = BuildTarget {
                name: name.clone(),
                kind,
                source_files: Vec::new(),
                is_runtime: false,
            };
            target.merge(declared.iter().cloned());
            target
        });
        target.merge(files);
        Ok(target)
    }

    /// Add files to a runtime target, creating it if absent.
    ///
    /// `raw` gets `kind`'s extension appended when it is missing.
    pub fn register_files<I, S>(
        &mut self,
        raw: &str,
        kind: AssetKind,
        files: I,
    ) -> Result<&BuildTarget>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = TargetName::parse(raw, kind);
        let target = self.set_files(&name, files)?;
        target.is_runtime = true;
        Ok(target)
    }

    /// Runtime targets in registration order.
    pub fn runtime_targets(&self) -> impl Iterator<Item = &BuildTarget> {
        self.targets.values().filter(|t| t.is_runtime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetConfig;

    fn config() -> AssetConfig {
        AssetConfig::from_str(
            r#"
            [targets]
            "default.js" = ["jquery.js", "app.js"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_get_files_reads_declared() {
        let config = config();
        let registry = TargetRegistry::new(&config);
        assert_eq!(registry.get_files("default.js"), ["jquery.js", "app.js"]);
        assert!(registry.get_files("missing.js").is_empty());
        assert!(!registry.is_runtime("default.js"));
    }

    #[test]
    fn test_register_merges_in_order() {
        let config = config();
        let mut registry = TargetRegistry::new(&config);
        registry.register_files("page", AssetKind::Script, ["a.js"]).unwrap();
        registry.register_files("page.js", AssetKind::Script, ["b.js"]).unwrap();
        registry.register_files("page", AssetKind::Script, ["a.js"]).unwrap();

        assert_eq!(registry.get_files("page.js"), ["a.js", "b.js"]);
        assert!(registry.is_runtime("page.js"));
        assert!(!registry.is_runtime("page"));
    }

    #[test]
    fn test_register_onto_declared_target() {
        let config = config();
        let mut registry = TargetRegistry::new(&config);
        let target = registry
            .register_files("default", AssetKind::Script, ["app.js", "extra.js"])
            .unwrap();

        assert_eq!(target.source_files, ["jquery.js", "app.js", "extra.js"]);
        assert!(target.is_runtime);
    }

    #[test]
    fn test_set_files_keeps_declared_flag() {
        let config = config();
        let mut registry = TargetRegistry::new(&config);
        let name = TargetName::Named("print.css".into());
        registry.set_files(&name, ["print.css"]).unwrap();

        assert_eq!(registry.get_files("print.css"), ["print.css"]);
        assert!(!registry.is_runtime("print.css"));
    }

    #[test]
    fn test_set_files_rejects_unknown_kind() {
        let config = config();
        let mut registry = TargetRegistry::new(&config);
        let name = TargetName::Named("logo.png".into());
        assert!(registry.set_files(&name, ["logo.png"]).is_err());
    }

    #[test]
    fn test_hash_target_key() {
        let config = config();
        let mut registry = TargetRegistry::new(&config);
        let target = registry
            .register_files(":hash-default", AssetKind::Style, ["reset.css"])
            .unwrap();
        assert!(target.name.is_content_addressed());
        assert_eq!(target.name.key(), ":hash-default.css");

        let runtime: Vec<_> = registry.runtime_targets().map(|t| t.name.key()).collect();
        assert_eq!(runtime, [":hash-default.css"]);
    }
}
