//! Asset Compress - resolve JavaScript and CSS build targets.

mod cli;

use anyhow::Result;
use asset_compress::{AssetConfig, config::find_config_file, log, logger};
use clap::{ColorChoice, Parser};
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    // `hash` is pure and needs no project
    if let cli::Commands::Hash { files, kind } = &cli.command {
        return cli::hash::print_hash(files, (*kind).into());
    }

    let Some(config_path) = find_config_file(&cli.config) else {
        log!("error"; "config file '{}' not found", cli.config.display());
        std::process::exit(1);
    };
    let config = AssetConfig::load(&config_path)?;

    cli::run(&cli.command, config)
}
