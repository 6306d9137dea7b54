use http::header::{COOKIE, HeaderMap};

/// Find the value of cookie `cookie_name` in the request headers.
///
/// Looks through every `Cookie` header, since HTTP/2 clients may split
/// cookies over several of them. Headers that are not valid strings are
/// skipped.
pub(crate) fn get_cookie_from_headers<'a>(
    headers: &'a HeaderMap,
    cookie_name: &str,
) -> Option<&'a str> {
    let value = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| match header.to_str() {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::debug!("Skipping invalid cookie header: {}", e);
                None
            }
        })
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|s| {
            let mut parts = s.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(k), Some(v)) if k == cookie_name => Some(v),
                _ => None,
            }
        });

    if value.is_none() {
        tracing::debug!("No cookie '{}' found in request", cookie_name);
    }

    value
}
