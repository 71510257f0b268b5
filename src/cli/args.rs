//! Command-line interface definitions.

use std::{path::PathBuf, str::FromStr};

use asset_compress::AssetKind;
use clap::{ColorChoice, Parser, Subcommand, ValueEnum};

/// Asset Compress build resolution CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: asset_compress.toml)
    #[arg(short = 'C', long, global = true, default_value = "asset_compress.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show whether targets are served from the cache or the build route
    #[command(visible_alias = "r")]
    Resolve {
        /// Target names with extension (e.g. default.js)
        #[arg(required = true, value_name = "TARGET")]
        targets: Vec<String>,

        /// Print JSON instead of text
        #[arg(short, long)]
        json: bool,
    },

    /// Print the cached build file for a target
    #[command(visible_alias = "l")]
    Locate {
        /// Concrete target name (e.g. app.js)
        #[arg(value_name = "TARGET")]
        target: String,
    },

    /// Print inclusion markup for declared targets
    #[command(visible_alias = "t")]
    Tags {
        /// Target names with extension (e.g. default.css)
        #[arg(required = true, value_name = "TARGET")]
        targets: Vec<String>,

        /// One tag per source file
        #[arg(short, long)]
        raw: bool,
    },

    /// Register runtime targets and print what a layout would include
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Print the content-addressed build name for a file list
    #[command(visible_alias = "h")]
    Hash {
        /// Source files in concatenation order
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,

        /// Asset kind of the files
        #[arg(short, long, value_enum)]
        kind: KindArg,
    },
}

/// Render command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Script files, `[TARGET=]a.js,b.js` (default target: :hash-default)
    #[arg(short, long = "script", value_name = "[TARGET=]FILES")]
    pub scripts: Vec<RuntimeFiles>,

    /// Stylesheet files, `[TARGET=]a.css,b.css` (default target: :hash-default)
    #[arg(short, long = "css", value_name = "[TARGET=]FILES")]
    pub css: Vec<RuntimeFiles>,

    /// One tag per source file
    #[arg(short, long)]
    pub raw: bool,
}

/// Asset kind as spelled on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Js,
    Css,
}

impl From<KindArg> for AssetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Js => AssetKind::Script,
            KindArg::Css => AssetKind::Style,
        }
    }
}

/// Files added to one runtime target.
///
/// ```text
/// app.js,widgets.js          -> default target
/// page=app.js,widgets.js     -> target "page"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeFiles {
    pub target: Option<String>,
    pub files: Vec<String>,
}

impl FromStr for RuntimeFiles {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, list) = match s.split_once('=') {
            Some((target, list)) if !target.trim().is_empty() => {
                (Some(target.trim().to_string()), list)
            }
            Some(_) => return Err(format!("missing target name before '=' in `{s}`")),
            None => (None, s),
        };

        let files: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if files.is_empty() {
            return Err(format!("no files in `{s}`"));
        }

        Ok(Self { target, files })
    }
}
