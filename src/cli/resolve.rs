//! `resolve` and `locate` commands.

use std::path::PathBuf;

use anyhow::{Result, bail};
use asset_compress::{CacheLocator, ResolvedReference, build::CachedArtifact, debug, log};
use serde::Serialize;

use super::Session;

/// One resolved target, as printed by `resolve --json`.
#[derive(Debug, Serialize)]
struct Resolution<'a> {
    target: &'a str,
    href: String,
    #[serde(flatten)]
    reference: ResolvedReference,
}

/// Print how each target would be served right now.
pub fn resolve_targets(session: &Session, targets: &[String], json: bool) -> Result<()> {
    println!("{}", format_resolutions(session, targets, json)?);
    Ok(())
}

/// One line per target, or a JSON array with `json`.
///
/// ```text
/// static  /cache_js/default.v12.js
/// dynamic /asset_compress/assets/get/page.js?file[0]=a.js
/// ```
fn format_resolutions(session: &Session, targets: &[String], json: bool) -> Result<String> {
    let render = session.render();

    let mut resolved = Vec::with_capacity(targets.len());
    for target in targets {
        let reference = render.resolve(target)?;
        let href = render.href(&reference);
        debug!("resolve"; "{} -> {}", target, href);
        resolved.push(Resolution {
            target,
            href,
            reference,
        });
    }

    if json {
        return Ok(serde_json::to_string_pretty(&resolved)?);
    }

    Ok(resolved
        .iter()
        .map(|entry| {
            let mode = if entry.reference.is_dynamic() {
                "dynamic"
            } else {
                "static"
            };
            format!("{mode:<7} {}", entry.href)
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Print the cached artifact for a concrete target name.
pub fn locate_target(session: &Session, target: &str) -> Result<()> {
    println!("{}", locate_path(session, target)?.display());
    Ok(())
}

fn locate_path(session: &Session, target: &str) -> Result<PathBuf> {
    let locator = CacheLocator::new(&session.config, &session.fs);
    match locator.locate(target) {
        Some(CachedArtifact { path, href, version }) => {
            if let Some(version) = version {
                debug!("locate"; "{} is build v{}", href, version);
            }
            Ok(path)
        }
        None => {
            log!("locate"; "no cached build for {}", target);
            bail!("`{target}` has no cached build");
        }
    }
}
