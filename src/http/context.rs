//! Per-request context handed to handlers.
//!
//! # Responsibilities
//! - Carry the method, path and routing result of one request
//! - Expose path params, query pairs and url-encoded form pairs
//!
//! # Design Decisions
//! - Lookups return `""` for missing keys, so handlers can format directly
//! - No decoding of path params; query and form pairs are percent-decoded

use axum::http::{header, request::Parts, Method};
use url::form_urlencoded;

use crate::http::request::request_id;
use crate::routing::{Params, RouteMatch};

/// What a handler sees of the request it serves.
#[derive(Debug, Clone)]
pub struct Context {
    pub method: Method,
    pub path: String,
    /// Pattern that matched, e.g. `/hello/:name`.
    pub pattern: String,
    pub params: Params,
    pub request_id: Option<String>,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl Context {
    /// Bare context, used by tests and by callers outside the HTTP server.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            pattern: String::new(),
            params: Params::new(),
            request_id: None,
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    pub(crate) fn from_request(parts: &Parts, route: RouteMatch<'_>, form_body: &[u8]) -> Self {
        let query = parts
            .uri
            .query()
            .map(|q| parse_pairs(q.as_bytes()))
            .unwrap_or_default();

        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            pattern: route.pattern.to_string(),
            params: route.params,
            request_id: request_id(&parts.headers).map(str::to_string),
            query,
            form: parse_pairs(form_body),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_query(mut self, raw: &str) -> Self {
        self.query = parse_pairs(raw.as_bytes());
        self
    }

    pub fn with_form(mut self, raw: &str) -> Self {
        self.form = parse_pairs(raw.as_bytes());
        self
    }

    /// Value bound to path parameter `key`.
    pub fn param(&self, key: &str) -> &str {
        self.params.get(key).map(String::as_str).unwrap_or("")
    }

    /// First query-string value for `key`.
    pub fn query(&self, key: &str) -> &str {
        first_value(&self.query, key)
    }

    /// Form value for `key`; the body wins over the query string.
    pub fn post_form(&self, key: &str) -> &str {
        self.form
            .iter()
            .chain(self.query.iter())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// True if the request carries an url-encoded form body.
pub(crate) fn has_form_body(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

fn parse_pairs(raw: &[u8]) -> Vec<(String, String)> {
    form_urlencoded::parse(raw).into_owned().collect()
}

fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> &'a str {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_are_empty() {
        let ctx = Context::new(Method::GET, "/");
        assert_eq!(ctx.param("name"), "");
        assert_eq!(ctx.query("name"), "");
        assert_eq!(ctx.post_form("name"), "");
    }

    #[test]
    fn test_query_is_decoded() {
        let ctx = Context::new(Method::GET, "/hello").with_query("name=gee%20tutu&name=second");
        assert_eq!(ctx.query("name"), "gee tutu");
    }

    #[test]
    fn test_form_takes_precedence_over_query() {
        let ctx = Context::new(Method::POST, "/login")
            .with_query("username=from-query&lang=en")
            .with_form("username=from-body&password=1234");
        assert_eq!(ctx.post_form("username"), "from-body");
        assert_eq!(ctx.post_form("password"), "1234");
        assert_eq!(ctx.post_form("lang"), "en");
    }

    #[test]
    fn test_from_request_collects_everything() {
        let (parts, _) = axum::http::Request::builder()
            .method(Method::GET)
            .uri("/hello/geektutu?lang=en")
            .header(crate::http::X_REQUEST_ID, "abc")
            .body(())
            .unwrap()
            .into_parts();
        let mut params = Params::new();
        params.insert("name".into(), "geektutu".into());
        let route = RouteMatch {
            pattern: "/hello/:name",
            params,
        };

        let ctx = Context::from_request(&parts, route, b"");
        assert_eq!(ctx.path, "/hello/geektutu");
        assert_eq!(ctx.pattern, "/hello/:name");
        assert_eq!(ctx.param("name"), "geektutu");
        assert_eq!(ctx.query("lang"), "en");
        assert_eq!(ctx.request_id.as_deref(), Some("abc"));
    }
}
