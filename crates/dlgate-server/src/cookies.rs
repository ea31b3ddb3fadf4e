//! Cookie reading and writing.
//!
//! Grants and CSRF tokens travel exclusively in cookies scoped to the
//! site root. Reading tolerates malformed headers by ignoring them: an
//! unparseable `Cookie` header is indistinguishable from an absent
//! cookie, which downstream verification treats as denial.

use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::Response;

use crate::error::AppError;

/// Extract a cookie's value from the request headers.
#[must_use]
pub fn value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().to_owned())
}

/// Build a `Set-Cookie` value scoped to the site root.
///
/// `SameSite=Strict` and `HttpOnly` always; `Secure` outside development.
#[must_use]
pub fn set_cookie(name: &str, value: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path=/; Max-Age={max_age_secs}; SameSite=Strict; HttpOnly");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Append a `Set-Cookie` header to a response.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the cookie string is not a valid
/// header value.
pub fn attach(response: &mut Response, cookie: &str) -> Result<(), AppError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|_| AppError::Internal("cookie header encoding failed".to_owned()))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for h in raw {
            map.append(header::COOKIE, HeaderValue::from_str(h).unwrap());
        }
        map
    }

    #[test]
    fn finds_cookie_among_pairs() {
        let map = headers(&["a=1; svs_dl_brochure=168.tag; b=2"]);
        assert_eq!(value(&map, "svs_dl_brochure").as_deref(), Some("168.tag"));
    }

    #[test]
    fn finds_cookie_across_multiple_headers() {
        let map = headers(&["a=1", "svs_dl_quotes=x.y"]);
        assert_eq!(value(&map, "svs_dl_quotes").as_deref(), Some("x.y"));
    }

    #[test]
    fn missing_cookie_is_none() {
        let map = headers(&["a=1; b=2"]);
        assert_eq!(value(&map, "svs_dl_brochure"), None);
    }

    #[test]
    fn malformed_pairs_are_ignored() {
        let map = headers(&["garbage; ;; =; svs_dl_brochure=ok"]);
        assert_eq!(value(&map, "svs_dl_brochure").as_deref(), Some("ok"));
    }

    #[test]
    fn set_cookie_carries_required_attributes() {
        let cookie = set_cookie("svs_dl_brochure", "168.tag", 300, false);
        assert!(cookie.starts_with("svs_dl_brochure=168.tag"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=300"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn set_cookie_is_secure_in_production() {
        let cookie = set_cookie("svs_dl_brochure", "168.tag", 300, true);
        assert!(cookie.ends_with("; Secure"));
    }
}
