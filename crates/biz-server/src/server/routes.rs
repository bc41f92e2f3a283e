//! Request routing. Pure functions over method and URL.

use tiny_http::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Upload,
    Report,
    Agent,
    Health,
    /// `GET /reports/<name>` with an already validated name.
    Download(String),
    /// Any `OPTIONS` request.
    Preflight,
    NotFound,
}

impl Route {
    /// Whether the handler reads a request body.
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Upload | Self::Report | Self::Agent)
    }
}

pub fn route(method: &Method, path: &str) -> Route {
    if *method == Method::Options {
        return Route::Preflight;
    }
    let trimmed = path.trim_end_matches('/');
    match (method, trimmed) {
        (Method::Post, "/upload") => Route::Upload,
        (Method::Post, "/report") => Route::Report,
        (Method::Post, "/agent") => Route::Agent,
        (Method::Get, "/health") => Route::Health,
        (Method::Get, other) => other
            .strip_prefix("/reports/")
            .filter(|name| is_report_name(name))
            .map_or(Route::NotFound, |name| Route::Download(name.to_string())),
        _ => Route::NotFound,
    }
}

/// A generated report file name: one path component of `[A-Za-z0-9._-]`,
/// not starting with a dot, ending in `.pdf`.
pub fn is_report_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name.ends_with(".pdf")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Split a request target into path and optional query string.
pub fn split_url(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Decoded value of `key` in a query string.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        if name != key {
            return None;
        }
        let value = value.replace('+', " ");
        urlencoding::decode(&value).ok().map(|v| v.into_owned())
    })
}
