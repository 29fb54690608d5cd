use axum::http::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response as AxumResponse};

use crate::config::CookieConfig;

const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

// -- Shared helpers --

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) {
    if let (Ok(name), Ok(val)) = (
        HeaderName::from_bytes(key.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        headers.insert(name, val);
    }
}

// ============================================================================
// Response
// ============================================================================

/// Response being assembled for the current request.
///
/// Handlers reach it through the request context; a handler's returned body
/// is placed into it once the handler finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Response {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE));

        Self {
            status: StatusCode::OK,
            headers,
            body: String::new(),
        }
    }

    /// A `200 OK` HTML response.
    pub fn html(body: impl Into<String>) -> Self {
        let mut response = Self::new();
        response.body = body.into();
        response
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Replaces a header. Invalid names or values are ignored.
    pub fn set_header(&mut self, key: &str, value: &str) -> &mut Self {
        insert_header(&mut self.headers, key, value);
        self
    }

    pub fn remove_header(&mut self, key: &str) -> &mut Self {
        self.headers.remove(key);
        self
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// Turns the response into a `302 Found` pointing at `location`.
    pub fn redirect(&mut self, location: &str) -> &mut Self {
        self.status = StatusCode::FOUND;
        self.body.clear();
        insert_header(&mut self.headers, LOCATION.as_str(), location);
        self
    }

    /// Appends a `Set-Cookie` header for `name` (prefixed per the cookie
    /// config) with the configured lifetime and attributes.
    pub fn set_cookie(&mut self, name: &str, value: &str, config: &CookieConfig) -> &mut Self {
        let max_age = (config.expires > 0).then(|| u64::from(config.expires) * 86_400);
        self.push_cookie(name, value, max_age, config)
    }

    /// Expires a framework cookie on the client.
    pub fn delete_cookie(&mut self, name: &str, config: &CookieConfig) -> &mut Self {
        self.push_cookie(name, "", Some(0), config)
    }

    fn push_cookie(
        &mut self,
        name: &str,
        value: &str,
        max_age: Option<u64>,
        config: &CookieConfig,
    ) -> &mut Self {
        let mut cookie = format!(
            "{}{}={}",
            config.prefix,
            name,
            urlencoding::encode(value)
        );
        if let Some(max_age) = max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        if !config.path.is_empty() {
            cookie.push_str(&format!("; Path={}", config.path));
        }
        if !config.domain.is_empty() {
            cookie.push_str(&format!("; Domain={}", config.domain));
        }
        if config.secure {
            cookie.push_str("; Secure");
        }
        if config.http_only {
            cookie.push_str("; HttpOnly");
        }
        if !config.same_site.is_empty() {
            cookie.push_str(&format!("; SameSite={}", config.same_site));
        }

        if let Ok(value) = HeaderValue::from_str(&cookie) {
            self.headers.append(SET_COOKIE, value);
        }
        self
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> AxumResponse {
        (self.status, self.headers, self.body).into_response()
    }
}
