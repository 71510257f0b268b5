//! Emission boundary: dynamic route URLs and inclusion markup.
//!
//! Both are traits so a host application can plug in its own router and
//! templating; the defaults produce plain paths and HTML tags.

mod markup;
mod route;

pub use markup::{HtmlTags, MarkupEmitter, TagAttrs, escape_attr};
pub use route::{DynamicRoutes, RouteBuilder};
