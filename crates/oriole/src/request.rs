// File: src/request.rs
// Purpose: Incoming request with parsed query, form fields and cookies

use axum::http::header::HOST;
use axum::http::{HeaderMap, HeaderValue, Method, Uri};
use oriole_router::path::url_decode;
use oriole_router::RequestTarget;
use std::collections::HashMap;

use crate::config::{AppConfig, CookieConfig};

/// Decoded `key=value` pairs from a query string or urlencoded body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    params: HashMap<String, String>,
}

impl Params {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Parses `a=1&b=two+words`. Keys without `=` get an empty value; later
    /// duplicates win.
    pub fn parse(input: &str) -> Self {
        let params = input
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (url_decode(key), url_decode(value))
            })
            .collect();

        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter parsed as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.params.get(key)?.parse().ok()
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }
}

/// An HTTP request as seen by route handlers.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path plus query string, as received.
    pub uri: String,
    pub headers: HeaderMap,
    pub query: Params,
    pub form: Params,
    pub cookies: HashMap<String, String>,
}

impl Request {
    /// `uri` may be origin-form (`/path?query`) or absolute-form
    /// (`http://host/path`). An absolute-form authority stands in for a
    /// missing `Host` header, as with HTTP/2 `:authority`.
    pub fn new(method: Method, uri: impl Into<String>, mut headers: HeaderMap) -> Self {
        let uri = Self::split_authority(uri.into(), &mut headers);
        let query = uri
            .split_once('?')
            .map(|(_, query)| query.split('#').next().unwrap_or_default())
            .map(Params::parse)
            .unwrap_or_default();
        let cookies = Self::parse_cookies(&headers);

        Self {
            method,
            uri,
            headers,
            query,
            form: Params::default(),
            cookies,
        }
    }

    /// Attaches the body's fields when it is `application/x-www-form-urlencoded`.
    pub fn with_body(mut self, body: &[u8]) -> Self {
        let is_form = self
            .header("content-type")
            .map(|ct| ct.contains("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            self.form = Params::parse(&String::from_utf8_lossy(body));
        }
        self
    }

    /// Reduces an absolute-form URI to path and query, moving its authority
    /// into `Host` when that header is absent.
    fn split_authority(uri: String, headers: &mut HeaderMap) -> String {
        let Ok(parsed) = uri.parse::<Uri>() else {
            return uri;
        };
        let Some(authority) = parsed.authority() else {
            return uri;
        };

        if !headers.contains_key(HOST) {
            let host = match authority.port_u16() {
                Some(port) => format!("{}:{}", authority.host(), port),
                None => authority.host().to_string(),
            };
            if let Ok(value) = HeaderValue::from_str(&host) {
                headers.insert(HOST, value);
            }
        }

        parsed
            .path_and_query()
            .map(|path| path.as_str().to_string())
            .unwrap_or_else(|| "/".to_string())
    }

    /// Parse cookies from Cookie header
    fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
        let mut cookies = HashMap::new();

        for header in headers.get_all("cookie") {
            if let Ok(cookie_str) = header.to_str() {
                for cookie in cookie_str.split(';') {
                    if let Some((key, value)) = cookie.trim().split_once('=') {
                        cookies.insert(key.to_string(), url_decode(value));
                    }
                }
            }
        }

        cookies
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Value of the `Host` header, port included. Empty when absent.
    pub fn host(&self) -> &str {
        self.header("host").unwrap_or_default()
    }

    pub fn is_post(&self) -> bool {
        self.method == Method::POST
    }

    /// CGI-style server variables: `REQUEST_METHOD` (lowercase),
    /// `HTTP_HOST` (lowercase), `REQUEST_URI` and `HTTPS`.
    pub fn server(&self, name: &str) -> Option<String> {
        match name {
            "REQUEST_METHOD" => Some(self.method.as_str().to_lowercase()),
            "HTTP_HOST" => Some(self.host().to_lowercase()),
            "REQUEST_URI" => Some(self.uri.clone()),
            "HTTPS" => (self.scheme() == "https").then(|| "on".to_string()),
            _ => None,
        }
    }

    /// `https` when a proxy says so through `X-Forwarded-Proto`, else `http`.
    pub fn scheme(&self) -> &'static str {
        match self.header("x-forwarded-proto") {
            Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
            _ => "http",
        }
    }

    /// `scheme://host` of the current request.
    pub fn current_base_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.host().to_lowercase())
    }

    /// Root URL of the public site, built from `public_domain` (falling back
    /// to the current host) and `public_base_path`.
    pub fn public_base_url(&self, app: &AppConfig) -> String {
        let domain = if app.public_domain.is_empty() {
            self.host().to_lowercase()
        } else {
            app.public_domain.to_lowercase()
        };
        let path = app.public_base_path.trim_matches('/');

        if path.is_empty() {
            format!("{}://{}/", self.scheme(), domain)
        } else {
            format!("{}://{}/{}", self.scheme(), domain, path)
        }
    }

    /// Reads a framework cookie, applying the configured prefix.
    pub fn cookie(&self, name: &str, config: &CookieConfig) -> Option<&str> {
        self.cookies
            .get(&format!("{}{}", config.prefix, name))
            .map(String::as_str)
    }

    /// What the router dispatches on.
    pub fn target(&self) -> RequestTarget {
        RequestTarget::new(self.method.as_str(), self.host(), &self.uri)
    }
}
