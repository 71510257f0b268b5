//! Inclusion markup for resolved references.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::asset::AssetKind;

/// Characters that require escaping inside an attribute value.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Extra tag attributes passed through untouched by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttrs(IndexMap<String, String>);

impl TagAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Renders the tag that includes one href of the given kind.
///
/// Must be a pure function of its arguments.
pub trait MarkupEmitter {
    fn tag(&self, kind: AssetKind, href: &str, attrs: &TagAttrs) -> String;
}

/// Plain HTML `<script>` / `<link>` tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTags;

impl MarkupEmitter for HtmlTags {
    fn tag(&self, kind: AssetKind, href: &str, attrs: &TagAttrs) -> String {
        let extra = render_attrs(attrs);
        match kind {
            AssetKind::Script => format!(
                r#"<script type="text/javascript" src="{}"{extra}></script>"#,
                escape_attr(href)
            ),
            AssetKind::Style => format!(
                r#"<link rel="stylesheet" type="text/css" href="{}"{extra} />"#,
                escape_attr(href)
            ),
        }
    }
}

fn render_attrs(attrs: &TagAttrs) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(r#" {}="{}""#, escape_attr(name), escape_attr(value)))
        .collect()
}

/// Escape HTML attribute values.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(&ESCAPE_CHARS[..]) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
