//! Command-line interface module.

mod args;
pub mod hash;
pub mod render;
pub mod resolve;

pub use args::{Cli, Commands, RenderArgs, RuntimeFiles};

use anyhow::Result;
use asset_compress::{AssetConfig, DiskFs, DynamicRoutes, HtmlTags, RenderCycle};

/// Collaborators a render cycle borrows for one command.
pub struct Session {
    pub config: AssetConfig,
    pub routes: DynamicRoutes,
    pub markup: HtmlTags,
    pub fs: DiskFs,
}

impl Session {
    pub fn new(config: AssetConfig) -> Self {
        let routes = config.routes();
        Self {
            config,
            routes,
            markup: HtmlTags,
            fs: DiskFs,
        }
    }

    /// Fresh render cycle with no runtime targets.
    pub fn render(&self) -> RenderCycle<'_> {
        RenderCycle::new(&self.config, &self.fs, &self.routes, &self.markup)
    }
}

/// Run a parsed command against loaded configuration.
pub fn run(command: &Commands, config: AssetConfig) -> Result<()> {
    let session = Session::new(config);
    match command {
        Commands::Resolve { targets, json } => resolve::resolve_targets(&session, targets, *json),
        Commands::Locate { target } => resolve::locate_target(&session, target),
        Commands::Tags { targets, raw } => render::print_tags(&session, targets, *raw),
        Commands::Render { args } => render::simulate_render(&session, args),
        Commands::Hash { files, kind } => hash::print_hash(files, (*kind).into()),
    }
}

/// Project with a js cache directory and two declared targets.
#[cfg(test)]
pub(crate) fn test_site() -> (tempfile::TempDir, Session) {
    use asset_compress::config::CONFIG_FILE;
    use std::fs;

    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("webroot/cache_js")).unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        r#"
[js]
caching = true
cache_dir = "webroot/cache_js"

[targets]
"default.js" = ["jquery.js", "app.js"]
"default.css" = ["reset.css"]
"#,
    )
    .unwrap();

    let config = AssetConfig::load(&path).unwrap();
    (dir, Session::new(config))
}
