//! Dynamic build URLs.
//!
//! ```text
//! /<prefixes...>/<build_url...>/<name>[?file[0]=a.js&file[1]=b.js]
//! ```

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::build::DynamicRoute;

/// Path segments are encoded except for the characters file names use.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Query values additionally keep `/` readable.
const QUERY_VALUE: &AsciiSet = &SEGMENT.remove(b'/');

/// Builds the URL of the dynamic build endpoint for a route.
pub trait RouteBuilder {
    fn dynamic_url(&self, route: &DynamicRoute) -> String;
}

/// Default route builder: fixed endpoint segments plus injectable prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRoutes {
    /// Leading segments of the host application (routing namespaces).
    prefixes: Vec<String>,
    /// Segments of the build endpoint itself.
    build_url: Vec<String>,
}

impl Default for DynamicRoutes {
    fn default() -> Self {
        Self::new(["asset_compress", "assets", "get"])
    }
}

impl DynamicRoutes {
    pub fn new<I, S>(build_url: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: Vec::new(),
            build_url: build_url.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    fn path(&self, name: &str) -> String {
        let mut url = String::new();
        let segments = self
            .prefixes
            .iter()
            .chain(&self.build_url)
            .map(String::as_str)
            .filter(|s| !s.is_empty());
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, SEGMENT));
        }
        // Target names may contain subdirectories
        for segment in name.split('/').filter(|s| !s.is_empty()) {
            url.push('/');
            url.extend(utf8_percent_encode(segment, SEGMENT));
        }
        url
    }
}

impl RouteBuilder for DynamicRoutes {
    fn dynamic_url(&self, route: &DynamicRoute) -> String {
        let mut url = self.path(&route.name);
        if route.runtime {
            let query = route
                .source_files
                .iter()
                .enumerate()
                .map(|(i, file)| format!("file[{i}]={}", utf8_percent_encode(file, QUERY_VALUE)))
                .collect::<Vec<_>>()
                .join("&");
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
        }
        url
    }
}
