//! The proxy's own origin as the client addressed it.
//!
//! The server listens on plain HTTP behind a TLS-terminating edge, so the
//! request URI usually carries only a path. The scheme is taken from an
//! absolute request URI, then `X-Forwarded-Proto` set by the edge, then
//! `http`. The host comes from the URI authority or the `Host` header.

use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::HeaderValue;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundOrigin {
    pub scheme: String,
    pub host: Option<HeaderValue>,
}

impl InboundOrigin {
    #[must_use]
    pub fn from_parts(parts: &Parts) -> Self {
        let scheme = parts
            .uri
            .scheme_str()
            .map(str::to_string)
            .or_else(|| {
                parts
                    .headers
                    .get(X_FORWARDED_PROTO)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.split(',').next())
                    .map(|v| v.trim().to_ascii_lowercase())
                    .filter(|v| !v.is_empty())
            })
            .unwrap_or_else(|| "http".to_string());

        let host = parts
            .uri
            .authority()
            .and_then(|a| HeaderValue::from_str(a.as_str()).ok())
            .or_else(|| parts.headers.get(HOST).cloned());

        Self { scheme, host }
    }

    /// `scheme://host`, or `None` when the client sent no host.
    #[must_use]
    pub fn origin(&self) -> Option<String> {
        let host = self.host.as_ref()?.to_str().ok()?;
        Some(format!("{}://{host}", self.scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn host_header_and_default_scheme() {
        let origin = InboundOrigin::from_parts(&parts("/d1/x", &[("host", "proxy.example.com")]));
        assert_eq!(origin.scheme, "http");
        assert_eq!(origin.origin().as_deref(), Some("http://proxy.example.com"));
    }

    #[test]
    fn forwarded_proto_from_edge() {
        let origin = InboundOrigin::from_parts(&parts(
            "/d1/x",
            &[("host", "proxy.example.com"), ("x-forwarded-proto", "HTTPS, http")],
        ));
        assert_eq!(origin.origin().as_deref(), Some("https://proxy.example.com"));
    }

    #[test]
    fn absolute_uri_wins() {
        let origin = InboundOrigin::from_parts(&parts(
            "https://edge.example.com:8443/d1",
            &[("host", "ignored.example.com"), ("x-forwarded-proto", "http")],
        ));
        assert_eq!(origin.origin().as_deref(), Some("https://edge.example.com:8443"));
    }

    #[test]
    fn missing_host_has_no_origin() {
        let origin = InboundOrigin::from_parts(&parts("/d1", &[]));
        assert_eq!(origin.origin(), None);
    }
}
