//! `hash` command.

use anyhow::Result;
use asset_compress::{AssetKind, TargetName};

/// Print the name a `:hash` target with these files builds to.
pub fn print_hash(files: &[String], kind: AssetKind) -> Result<()> {
    println!("{}", TargetName::hashed(kind).concrete(files));
    Ok(())
}
