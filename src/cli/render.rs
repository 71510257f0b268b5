//! `tags` and `render` commands.

use anyhow::Result;
use asset_compress::{AssetKind, IncludeOptions, RenderCycle, debug};

use super::{RenderArgs, RuntimeFiles, Session};

/// Print markup for declared targets.
pub fn print_tags(session: &Session, targets: &[String], raw: bool) -> Result<()> {
    println!("{}", tags_markup(session, targets, raw)?);
    Ok(())
}

fn tags_markup(session: &Session, targets: &[String], raw: bool) -> Result<String> {
    let render = session.render();
    let opts = if raw {
        IncludeOptions::raw()
    } else {
        IncludeOptions::default()
    };

    let mut markup = Vec::with_capacity(targets.len());
    for target in targets {
        markup.push(match AssetKind::from_name(target)? {
            AssetKind::Script => render.script(target, &opts)?,
            AssetKind::Style => render.css(target, &opts)?,
        });
    }
    Ok(markup.join("\n"))
}

/// Register runtime targets the way a template would, then print what the
/// layout's `include_assets` call emits.
pub fn simulate_render(session: &Session, args: &RenderArgs) -> Result<()> {
    println!("{}", render_markup(session, args)?);
    Ok(())
}

fn render_markup(session: &Session, args: &RenderArgs) -> Result<String> {
    let mut render = session.render();

    register_all(&mut render, AssetKind::Script, &args.scripts)?;
    register_all(&mut render, AssetKind::Style, &args.css)?;

    for target in render.runtime_targets() {
        debug!("include"; "{}: {}", target.name, target.source_files.join(", "));
    }

    Ok(render.include_assets(args.raw)?)
}

fn register_all(render: &mut RenderCycle<'_>, kind: AssetKind, entries: &[RuntimeFiles]) -> Result<()> {
    for entry in entries {
        render.register(kind, entry.target.as_deref(), entry.files.iter().cloned())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_site;
    use asset_compress::asset::fingerprint;

    fn files(target: Option<&str>, files: &[&str]) -> RuntimeFiles {
        RuntimeFiles {
            target: target.map(str::to_string),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_tags() {
        let (_dir, session) = test_site();
        let targets = vec!["default.js".to_string(), "default.css".to_string()];

        assert_eq!(
            tags_markup(&session, &targets, false).unwrap(),
            [
                r#"<script type="text/javascript" src="/asset_compress/assets/get/default.js"></script>"#,
                r#"<link rel="stylesheet" type="text/css" href="/asset_compress/assets/get/default.css" />"#,
            ]
            .join("\n")
        );
        assert_eq!(tags_markup(&session, &targets, true).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_tags_rejects_unknown_kind() {
        let (_dir, session) = test_site();
        assert!(tags_markup(&session, &["logo.png".to_string()], false).is_err());
    }

    #[test]
    fn test_render_includes_css_then_js() {
        let (_dir, session) = test_site();
        let args = RenderArgs {
            scripts: vec![files(Some("page"), &["a.js"])],
            css: vec![files(None, &["reset.css"])],
            raw: false,
        };

        let digest = fingerprint(&["reset.css"]);
        let css = format!(
            r#"<link rel="stylesheet" type="text/css" href="/asset_compress/assets/get/{digest}.css?file[0]=reset.css" />"#
        );
        let js = r#"<script type="text/javascript" src="/asset_compress/assets/get/page.js?file[0]=a.js"></script>"#;
        assert_eq!(render_markup(&session, &args).unwrap(), format!("{css}\n{js}"));
    }

    #[test]
    fn test_render_raw() {
        let (_dir, session) = test_site();
        let args = RenderArgs {
            scripts: vec![files(Some("page"), &["a.js", "b.js"])],
            css: vec![],
            raw: true,
        };

        assert_eq!(
            render_markup(&session, &args).unwrap(),
            [
                "",
                r#"<script type="text/javascript" src="/js/a.js"></script>"#,
                r#"<script type="text/javascript" src="/js/b.js"></script>"#,
            ]
            .join("\n")
        );
    }
}
