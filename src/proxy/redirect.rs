//! Redirect `Location` rewriting.
//!
//! A redirect that stays on the upstream's origin is mapped back under
//! the matched prefix so the client's next request comes through the
//! proxy again. Redirects to any other origin are left alone.

use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use url::Url;

use crate::config::model::MatchResult;

/// Compute the client-facing `Location` for an upstream redirect.
///
/// Returns `None` when the response is not a redirect, has no usable
/// `Location`, or points off the upstream's origin; the upstream header
/// is then passed through untouched.
#[must_use]
pub fn rewrite_location(
    status: StatusCode,
    headers: &HeaderMap,
    target_url: &Url,
    matched: MatchResult<'_>,
    proxy_origin: Option<&str>,
) -> Option<HeaderValue> {
    if !status.is_redirection() {
        return None;
    }
    let location = headers.get(LOCATION)?.to_str().ok()?;
    let Ok(resolved) = target_url.join(location) else {
        tracing::debug!(location = %location, "unparseable redirect location, passing through");
        return None;
    };

    if resolved.origin() != target_url.origin() {
        tracing::debug!(location = %location, "passing through external redirect");
        return None;
    }

    let query = resolved
        .query()
        .filter(|q| !q.is_empty())
        .map(|q| format!("?{q}"))
        .unwrap_or_default();
    let rewritten = format!(
        "{}{}{}{query}",
        proxy_origin.unwrap_or(""),
        matched.prefix,
        resolved.path()
    );

    match HeaderValue::from_str(&rewritten) {
        Ok(value) => {
            tracing::debug!(from = %location, to = %rewritten, "rewriting redirect");
            Some(value)
        }
        Err(_) => {
            tracing::warn!(
                from = %location,
                to = %rewritten,
                "rewritten redirect is not a valid header value, passing through"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROXY: Option<&str> = Some("https://proxy.example.com");

    fn matched() -> MatchResult<'static> {
        MatchResult {
            prefix: "/d1",
            upstream: "https://d1.api.example.com",
        }
    }

    fn target() -> Url {
        Url::parse("https://d1.api.example.com/old/path?x=1").unwrap()
    }

    fn location(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn same_origin_absolute_is_rewritten() {
        let rewritten = rewrite_location(
            StatusCode::FOUND,
            &location("https://d1.api.example.com/new/path"),
            &target(),
            matched(),
            PROXY,
        );
        assert_eq!(rewritten.unwrap(), "https://proxy.example.com/d1/new/path");
    }

    #[test]
    fn relative_location_keeps_query() {
        let rewritten = rewrite_location(
            StatusCode::MOVED_PERMANENTLY,
            &location("/login?next=%2Fhome"),
            &target(),
            matched(),
            PROXY,
        );
        assert_eq!(
            rewritten.unwrap(),
            "https://proxy.example.com/d1/login?next=%2Fhome"
        );
    }

    #[test]
    fn path_relative_location_resolves_against_target() {
        let rewritten = rewrite_location(
            StatusCode::SEE_OTHER,
            &location("sibling"),
            &target(),
            matched(),
            PROXY,
        );
        assert_eq!(rewritten.unwrap(), "https://proxy.example.com/d1/old/sibling");
    }

    #[test]
    fn cross_origin_passes_through() {
        let headers = location("https://other.example.com/x");
        assert!(rewrite_location(StatusCode::FOUND, &headers, &target(), matched(), PROXY).is_none());
    }

    #[test]
    fn different_port_or_scheme_is_cross_origin() {
        let headers = location("https://d1.api.example.com:8443/x");
        assert!(rewrite_location(StatusCode::FOUND, &headers, &target(), matched(), PROXY).is_none());

        let headers = location("http://d1.api.example.com/x");
        assert!(rewrite_location(StatusCode::FOUND, &headers, &target(), matched(), PROXY).is_none());
    }

    #[test]
    fn explicit_default_port_is_same_origin() {
        let headers = location("https://d1.api.example.com:443/x");
        let rewritten = rewrite_location(StatusCode::FOUND, &headers, &target(), matched(), PROXY);
        assert_eq!(rewritten.unwrap(), "https://proxy.example.com/d1/x");
    }

    #[test]
    fn non_redirect_status_is_ignored() {
        let headers = location("https://d1.api.example.com/new");
        assert!(rewrite_location(StatusCode::CREATED, &headers, &target(), matched(), PROXY).is_none());
    }

    #[test]
    fn missing_location_is_ignored() {
        let rewritten =
            rewrite_location(StatusCode::FOUND, &HeaderMap::new(), &target(), matched(), PROXY);
        assert!(rewritten.is_none());
    }

    #[test]
    fn unknown_proxy_origin_yields_relative_location() {
        let headers = location("https://d1.api.example.com/new?y=2");
        let rewritten = rewrite_location(StatusCode::FOUND, &headers, &target(), matched(), None);
        assert_eq!(rewritten.unwrap(), "/d1/new?y=2");
    }

    #[test]
    fn empty_query_is_dropped() {
        let headers = location("https://d1.api.example.com/new?");
        let rewritten = rewrite_location(StatusCode::FOUND, &headers, &target(), matched(), PROXY);
        assert_eq!(rewritten.unwrap(), "https://proxy.example.com/d1/new");
    }

    #[test]
    fn unrepresentable_rewrite_passes_through() {
        let headers = location("https://d1.api.example.com/new");
        let rewritten = rewrite_location(
            StatusCode::FOUND,
            &headers,
            &target(),
            matched(),
            Some("https://proxy.example.com\n"),
        );
        assert!(rewritten.is_none());
    }
}
