//! Path utilities shared by registration and dispatch.
//!
//! All functions are pure.

use std::borrow::Cow;

pub(crate) fn is_slash_or_space(c: char) -> bool {
    c == '/' || c == ' '
}

/// Decodes `+` as a space and `%XX` escapes; invalid UTF-8 is replaced
/// rather than rejected.
///
/// ```
/// use oriole_router::path::url_decode;
///
/// assert_eq!(url_decode("caf%C3%A9+menu"), "café menu");
/// ```
pub fn url_decode(input: &str) -> String {
    let spaced: Cow<'_, str> = if input.contains('+') {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };

    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Normalises a request URI into the form route patterns are matched
/// against: query string and fragment dropped, URL-decoded, surrounding
/// slashes and spaces trimmed. The root path stays `/`.
///
/// ```
/// use oriole_router::path::normalize_request_path;
///
/// assert_eq!(normalize_request_path("/templates/edit/7/?tab=main"), "templates/edit/7");
/// assert_eq!(normalize_request_path("/"), "/");
/// assert_eq!(normalize_request_path(""), "/");
/// ```
pub fn normalize_request_path(uri: &str) -> String {
    let path = uri.split(['?', '#']).next().unwrap_or_default();
    let decoded = url_decode(path);
    let trimmed = decoded.trim_matches(is_slash_or_space);

    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
