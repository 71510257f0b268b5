//! Render cycle: the per-request facade over registry, policy and tracker.
//!
//! One `RenderCycle` serves exactly one render. Concurrent renders each
//! build their own; dropping it discards every runtime target.
//!
//! # Example
//!
//! ```ignore
//! let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);
//! render.add_css(["reset.css", "layout.css"], Some("default"))?;
//! render.add_script(["widgets.js"], None)?;
//! let head = render.include_assets(false)?;
//! ```

use super::{
    BuildTarget, CacheLocator, ConfigProvider, FileSystem, InclusionState, ResolutionPolicy,
    ResolvedReference, StaticFile, TargetRegistry,
};
use crate::asset::{AssetKind, TargetName};
use crate::emit::{MarkupEmitter, RouteBuilder, TagAttrs};
use crate::error::{BuildError, Result};
use crate::debug;

/// Options for a tag or include call.
#[derive(Debug, Clone, Default)]
pub struct IncludeOptions {
    /// One tag per source file instead of one per build.
    pub raw: bool,
    /// Passed through to the markup emitter.
    pub attrs: TagAttrs,
}

impl IncludeOptions {
    pub fn raw() -> Self {
        Self {
            raw: true,
            ..Self::default()
        }
    }
}

pub struct RenderCycle<'a> {
    config: &'a dyn ConfigProvider,
    routes: &'a dyn RouteBuilder,
    markup: &'a dyn MarkupEmitter,
    policy: ResolutionPolicy<'a>,
    registry: TargetRegistry<'a>,
    state: InclusionState,
}

impl<'a> RenderCycle<'a> {
    pub fn new(
        config: &'a dyn ConfigProvider,
        fs: &'a dyn FileSystem,
        routes: &'a dyn RouteBuilder,
        markup: &'a dyn MarkupEmitter,
    ) -> Self {
        Self {
            config,
            routes,
            markup,
            policy: ResolutionPolicy::new(config, CacheLocator::new(config, fs)),
            registry: TargetRegistry::new(config),
            state: InclusionState::new(),
        }
    }

    // ========================================================================
    // registration
    // ========================================================================

    /// Add script files to a runtime target (default: `:hash-default.js`).
    pub fn add_script<I, S>(&mut self, files: I, target: Option<&str>) -> Result<TargetName>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register(AssetKind::Script, target, files)
    }

    /// Add stylesheet files to a runtime target (default: `:hash-default.css`).
    pub fn add_css<I, S>(&mut self, files: I, target: Option<&str>) -> Result<TargetName>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register(AssetKind::Style, target, files)
    }

    /// Register files under a target and mark it pending for `kind`.
    ///
    /// A target that still has no files afterwards is not marked pending.
    pub fn register<I, S>(&mut self, kind: AssetKind, target: Option<&str>, files: I) -> Result<TargetName>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw = target.map_or_else(|| TargetName::hashed(kind).key(), str::to_string);
        let target = self.registry.register_files(&raw, kind, files)?;
        let name = target.name.clone();
        if !target.source_files.is_empty() && !self.state.mark_pending(kind, name.key()) {
            debug!("include"; "{} already included this render", name);
        }
        Ok(name)
    }

    /// Ordered files of a target (runtime or declared), empty when unknown.
    pub fn files(&self, target: &str) -> &[String] {
        self.registry.get_files(target)
    }

    /// Targets defined during this render, in registration order.
    pub fn runtime_targets(&self) -> impl Iterator<Item = &BuildTarget> {
        self.registry.runtime_targets()
    }

    /// Targets of `kind` registered this render and not yet included.
    pub fn pending(&self, kind: AssetKind) -> Vec<String> {
        self.state.pending(kind)
    }

    // ========================================================================
    // resolution
    // ========================================================================

    /// Resolve a target name carrying its extension (`default.js`).
    pub fn resolve(&self, target: &str) -> Result<ResolvedReference> {
        let name = TargetName::from_full(target)?;
        self.policy.resolve(&self.registry, &name)
    }

    /// Whether `target` would be served by the dynamic builder right now.
    pub fn should_use_dynamic_build(&self, target: &str) -> Result<bool> {
        let name = TargetName::from_full(target)?;
        let concrete = name.concrete(self.registry.get_files(&name.key()));
        self.policy.should_use_dynamic_build(&concrete)
    }

    /// Href for a reference, with the kind's base URL applied to builds.
    pub fn href(&self, reference: &ResolvedReference) -> String {
        let kind = reference.kind();
        match reference {
            ResolvedReference::StaticFile(file) => self.with_base_url(kind, &file.path),
            ResolvedReference::DynamicRoute(route) => {
                self.with_base_url(kind, &self.routes.dynamic_url(route))
            }
            ResolvedReference::SourceFile(file) => self.source_href(kind, &file.path),
        }
    }

    /// Absolute URLs and root-relative paths are used as-is; relative
    /// paths get the kind's source URL (default `/<ext>/`).
    fn source_href(&self, kind: AssetKind, path: &str) -> String {
        if path.starts_with('/') || url::Url::parse(path).is_ok() {
            return path.to_string();
        }
        let prefix = self
            .config
            .source_url_for(kind)
            .map_or_else(|| format!("/{}/", kind.ext()), str::to_string);
        format!("{}/{}", prefix.trim_end_matches('/'), path)
    }

    fn with_base_url(&self, kind: AssetKind, route: &str) -> String {
        match self.config.base_url_for(kind) {
            Some(base) => format!("{base}{route}"),
            None => route.to_string(),
        }
    }

    // ========================================================================
    // markup for a single target
    // ========================================================================

    /// Script tag(s) for a target, declared or runtime.
    pub fn script(&self, target: &str, opts: &IncludeOptions) -> Result<String> {
        self.tag(AssetKind::Script, target, opts)
    }

    /// Stylesheet tag(s) for a target, declared or runtime.
    pub fn css(&self, target: &str, opts: &IncludeOptions) -> Result<String> {
        self.tag(AssetKind::Style, target, opts)
    }

    fn tag(&self, kind: AssetKind, target: &str, opts: &IncludeOptions) -> Result<String> {
        let name = TargetName::parse(target, kind);
        let refs = if opts.raw {
            self.source_refs(kind, &name.key())?
        } else {
            vec![self.policy.resolve(&self.registry, &name)?]
        };
        Ok(self.emit(&refs, &opts.attrs))
    }

    /// One reference per source file of a target.
    fn source_refs(&self, kind: AssetKind, key: &str) -> Result<Vec<ResolvedReference>> {
        let files = self.registry.get_files(key);
        if files.is_empty() {
            return Err(BuildError::unknown(key));
        }
        Ok(files
            .iter()
            .map(|file| {
                ResolvedReference::SourceFile(StaticFile {
                    kind,
                    path: file.clone(),
                })
            })
            .collect())
    }

    fn emit(&self, refs: &[ResolvedReference], attrs: &TagAttrs) -> String {
        refs.iter()
            .map(|r| self.markup.tag(r.kind(), &self.href(r), attrs))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // inclusion tracking
    // ========================================================================

    /// Resolve and consume pending targets of `kind`.
    ///
    /// With no names, every pending target is consumed in registration
    /// order. Names without pending files are skipped, not errors.
    pub fn consume(&mut self, names: &[&str], kind: AssetKind) -> Result<Vec<ResolvedReference>> {
        self.consume_with(names, kind, |render, name| {
            Ok(vec![render.policy.resolve(&render.registry, name)?])
        })
    }

    /// Like [`Self::consume`], but one reference per source file.
    pub fn consume_raw(&mut self, names: &[&str], kind: AssetKind) -> Result<Vec<ResolvedReference>> {
        self.consume_with(names, kind, |render, name| render.source_refs(kind, &name.key()))
    }

    fn consume_with<F>(&mut self, names: &[&str], kind: AssetKind, resolve: F) -> Result<Vec<ResolvedReference>>
    where
        F: Fn(&Self, &TargetName) -> Result<Vec<ResolvedReference>>,
    {
        let candidates: Vec<TargetName> = if names.is_empty() {
            self.state
                .pending(kind)
                .iter()
                .map(|key| TargetName::parse(key, kind))
                .collect()
        } else {
            names.iter().map(|n| TargetName::parse(n, kind)).collect()
        };

        let mut output = Vec::new();
        for name in candidates {
            let key = name.key();
            if !self.state.is_pending(kind, &key) {
                debug!("include"; "skip {}: nothing pending", key);
                continue;
            }
            output.extend(resolve(self, &name)?);
            self.state.take(kind, &key);
        }
        Ok(output)
    }

    /// Markup for pending targets of one kind, joined by newlines.
    pub fn include(&mut self, kind: AssetKind, names: &[&str], opts: &IncludeOptions) -> Result<String> {
        let refs = if opts.raw || !self.config.concatenate() {
            self.consume_raw(names, kind)?
        } else {
            self.consume(names, kind)?
        };
        Ok(self.emit(&refs, &opts.attrs))
    }

    pub fn include_js(&mut self, names: &[&str], opts: &IncludeOptions) -> Result<String> {
        self.include(AssetKind::Script, names, opts)
    }

    pub fn include_css(&mut self, names: &[&str], opts: &IncludeOptions) -> Result<String> {
        self.include(AssetKind::Style, names, opts)
    }

    /// Every pending stylesheet, then every pending script.
    pub fn include_assets(&mut self, raw: bool) -> Result<String> {
        let opts = IncludeOptions {
            raw,
            ..IncludeOptions::default()
        };
        let css = self.include_css(&[], &opts)?;
        let js = self.include_js(&[], &opts)?;
        Ok(format!("{css}\n{js}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::fingerprint;
    use crate::build::{DiskFs, DynamicRoute};
    use crate::config::AssetConfig;
    use crate::emit::{DynamicRoutes, HtmlTags};
    use std::fs;
    use tempfile::TempDir;

    fn site(dir: &TempDir, extra: &str) -> AssetConfig {
        fs::create_dir_all(dir.path().join("webroot/cache_js")).unwrap();
        fs::create_dir_all(dir.path().join("webroot/cache_css")).unwrap();
        let mut config = AssetConfig::from_str(&format!(
            r#"
            [paths]
            webroot = "webroot"

            [js]
            caching = true
            cache_dir = "webroot/cache_js"

            [css]
            caching = true
            cache_dir = "webroot/cache_css"

            [targets]
            "default.js" = ["jquery.js", "app.js"]
            {extra}
            "#
        ))
        .unwrap();
        config.normalize_paths(dir.path());
        config
    }

    #[test]
    fn test_consume_twice() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        render.add_script(["extra.js"], Some("default")).unwrap();

        let first = render.consume(&["default.js"], AssetKind::Script).unwrap();
        assert_eq!(first.len(), 1);
        assert!(render.consume(&["default.js"], AssetKind::Script).unwrap().is_empty());
        assert!(render.consume(&["default"], AssetKind::Script).unwrap().is_empty());
    }

    #[test]
    fn test_consumed_target_stays_consumed() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        render.add_script(["a.js"], Some("page")).unwrap();
        assert_eq!(render.consume(&["page"], AssetKind::Script).unwrap().len(), 1);

        // Files still merge, but the target is not emitted twice
        render.add_script(["b.js"], Some("page")).unwrap();
        assert_eq!(render.files("page.js"), ["a.js", "b.js"]);
        assert!(render.pending(AssetKind::Script).is_empty());
        assert!(render.consume(&["page"], AssetKind::Script).unwrap().is_empty());
        assert!(render.consume(&[], AssetKind::Script).unwrap().is_empty());
    }

    #[test]
    fn test_consume_skips_unpopulated_targets() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        // Declared but not added this render, and never declared at all
        let refs = render.consume(&["default", "nowhere"], AssetKind::Script).unwrap();
        assert!(refs.is_empty());
        // Registered as css, asked for as js
        render.add_css(["a.css"], Some("page")).unwrap();
        assert!(render.consume(&["page"], AssetKind::Script).unwrap().is_empty());
        assert_eq!(render.pending(AssetKind::Style), ["page.css"]);
    }

    #[test]
    fn test_consume_all_in_registration_order() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        render.add_script(["b.js"], Some("second")).unwrap();
        render.add_script(["a.js"], Some("first")).unwrap();

        let targets: Vec<_> = render
            .consume(&[], AssetKind::Script)
            .unwrap()
            .into_iter()
            .map(|r| match r {
                ResolvedReference::DynamicRoute(route) => route.target,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(targets, ["second.js", "first.js"]);
        assert!(render.pending(AssetKind::Script).is_empty());
    }

    #[test]
    fn test_default_target_is_content_addressed() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        let name = render.add_script(["a.js", "b.js"], None).unwrap();
        assert_eq!(name.key(), ":hash-default.js");

        let html = render.include_js(&[], &IncludeOptions::default()).unwrap();
        let digest = fingerprint(&["a.js", "b.js"]);
        assert_eq!(
            html,
            format!(
                r#"<script type="text/javascript" src="/asset_compress/assets/get/{digest}.js?file[0]=a.js&amp;file[1]=b.js"></script>"#
            )
        );
    }

    #[test]
    fn test_scenario_dynamic_then_static() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);
        render
            .add_css(["reset.css", "layout.css"], Some("default.css"))
            .unwrap();

        assert_eq!(
            render.resolve("default.css").unwrap(),
            ResolvedReference::DynamicRoute(DynamicRoute {
                kind: AssetKind::Style,
                target: "default.css".into(),
                name: "default.css".into(),
                source_files: vec!["reset.css".into(), "layout.css".into()],
                runtime: true,
            })
        );
        assert!(render.should_use_dynamic_build("default.css").unwrap());

        fs::write(dir.path().join("webroot/cache_css/default.css"), "").unwrap();

        assert_eq!(
            render.resolve("default.css").unwrap(),
            ResolvedReference::StaticFile(StaticFile {
                kind: AssetKind::Style,
                path: "/cache_css/default.css".into(),
            })
        );
        assert!(!render.should_use_dynamic_build("default.css").unwrap());
    }

    #[test]
    fn test_script_for_unknown_target_fails() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        let err = render.script("missing", &IncludeOptions::default()).unwrap_err();
        assert_eq!(err, BuildError::unknown("missing.js"));
        assert!(render.css("missing", &IncludeOptions::raw()).is_err());
        assert!(matches!(
            render.resolve("missing.png"),
            Err(BuildError::UnsupportedAssetKind { .. })
        ));
    }

    #[test]
    fn test_script_declared_target() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        // Declared target: no file list in the query string
        assert_eq!(
            render.script("default", &IncludeOptions::default()).unwrap(),
            r#"<script type="text/javascript" src="/asset_compress/assets/get/default.js"></script>"#
        );

        fs::write(dir.path().join("webroot/cache_js/default.v4.js"), "").unwrap();
        assert_eq!(
            render.script("default", &IncludeOptions::default()).unwrap(),
            r#"<script type="text/javascript" src="/cache_js/default.v4.js"></script>"#
        );
    }

    #[test]
    fn test_raw_tags() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        assert_eq!(
            render.script("default.js", &IncludeOptions::raw()).unwrap(),
            [
                r#"<script type="text/javascript" src="/js/jquery.js"></script>"#,
                r#"<script type="text/javascript" src="/js/app.js"></script>"#,
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_raw_keeps_absolute_sources() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);
        render
            .add_script(
                ["https://code.jquery.com/jquery.js", "/vendor/x.js", "app.js"],
                Some("page"),
            )
            .unwrap();

        assert_eq!(
            render.include_js(&[], &IncludeOptions::raw()).unwrap(),
            [
                r#"<script type="text/javascript" src="https://code.jquery.com/jquery.js"></script>"#,
                r#"<script type="text/javascript" src="/vendor/x.js"></script>"#,
                r#"<script type="text/javascript" src="/js/app.js"></script>"#,
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_raw_uses_source_url_for_relative_paths() {
        let dir = TempDir::new().unwrap();
        let mut config = site(&dir, "");
        config.css.source_url = Some("https://static.example.com/css/".into());
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);
        render.add_css(["themes/dark.css", "/print.css"], Some("page")).unwrap();

        assert_eq!(
            render.include_css(&[], &IncludeOptions::raw()).unwrap(),
            [
                r#"<link rel="stylesheet" type="text/css" href="https://static.example.com/css/themes/dark.css" />"#,
                r#"<link rel="stylesheet" type="text/css" href="/print.css" />"#,
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_base_url_applies_to_builds() {
        let dir = TempDir::new().unwrap();
        let mut config = site(&dir, "");
        config.css.base_url = Some("https://cdn.example.com".into());
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);
        render.add_css(["a.css"], Some("theme")).unwrap();

        let html = render.include_css(&["theme"], &IncludeOptions::default()).unwrap();
        assert!(html.contains(r#"href="https://cdn.example.com/asset_compress/assets/get/theme.css?file[0]=a.css""#));
    }

    #[test]
    fn test_include_assets() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);
        render.add_css(["a.css", "b.css"], Some("page")).unwrap();
        render.add_script(["a.js"], Some("page")).unwrap();

        let html = render.include_assets(true).unwrap();
        assert_eq!(
            html,
            [
                r#"<link rel="stylesheet" type="text/css" href="/css/a.css" />"#,
                r#"<link rel="stylesheet" type="text/css" href="/css/b.css" />"#,
                r#"<script type="text/javascript" src="/js/a.js"></script>"#,
            ]
            .join("\n")
        );
        assert_eq!(render.include_assets(false).unwrap(), "\n");
    }

    #[test]
    fn test_concatenation_off_forces_raw() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "[general]\nconcatenate = false\n");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);
        render.add_script(["a.js", "b.js"], Some("page")).unwrap();

        let refs = render.include_js(&[], &IncludeOptions::default()).unwrap();
        assert_eq!(refs.lines().count(), 2);
    }

    #[test]
    fn test_empty_registration_is_not_pending() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "");
        let routes = DynamicRoutes::default();
        let mut render = RenderCycle::new(&config, &DiskFs, &routes, &HtmlTags);

        render.add_script(Vec::<String>::new(), Some("empty")).unwrap();
        assert!(render.pending(AssetKind::Script).is_empty());
        assert!(render.files("empty.js").is_empty());
    }
}
