//! Header construction for both directions of the proxy.
//!
//! [`build_forwarded_headers`] copies the client headers, strips
//! hop-by-hop headers, rewrites `Host` for the upstream, and sets the
//! `X-Forwarded-*` identity headers. [`build_response_headers`] copies the
//! upstream headers, strips hop-by-hop headers, overwrites the CORS
//! headers, drops the framing policies that would block cross-origin use,
//! and applies a rewritten `Location`. Both return a finished map that is
//! handed to the request or response builder as-is.

use std::sync::LazyLock;

use axum::http::header::{CONTENT_SECURITY_POLICY, LOCATION, X_FRAME_OPTIONS};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use super::cors;
use super::origin::InboundOrigin;

static HOP_BY_HOP: LazyLock<Vec<HeaderName>> = LazyLock::new(|| {
    [
        "connection",
        "keep-alive",
        "transfer-encoding",
        "te",
        "trailer",
        "upgrade",
        "proxy-authorization",
        "proxy-authenticate",
    ]
    .iter()
    .filter_map(|name| name.parse::<HeaderName>().ok())
    .collect()
});

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
}

fn insert_str(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(val) => {
            headers.insert(name, val);
        }
        Err(_) => {
            tracing::warn!(header = name, "header value not representable, skipping");
        }
    }
}

pub fn build_forwarded_headers(
    original: &HeaderMap,
    target_url: &url::Url,
    client_ip: &str,
    inbound: &InboundOrigin,
) -> HeaderMap {
    let mut headers = original.clone();
    strip_hop_by_hop(&mut headers);

    // Host must name the upstream for virtual-hosted backends
    if let Some(host) = target_url.host_str() {
        let host_value = target_url
            .port()
            .map_or_else(|| host.to_string(), |port| format!("{host}:{port}"));
        insert_str(&mut headers, "host", &host_value);
    }

    insert_str(&mut headers, X_FORWARDED_FOR, client_ip);

    match &inbound.host {
        Some(original_host) => {
            headers.insert(X_FORWARDED_HOST, original_host.clone());
        }
        None => {
            headers.remove(X_FORWARDED_HOST);
        }
    }

    insert_str(&mut headers, X_FORWARDED_PROTO, &inbound.scheme);

    headers
}

pub fn build_response_headers(upstream: &HeaderMap, location: Option<HeaderValue>) -> HeaderMap {
    let mut headers = upstream.clone();
    strip_hop_by_hop(&mut headers);

    for (name, value) in cors::cors_headers() {
        headers.insert(name, value);
    }

    headers.remove(CONTENT_SECURITY_POLICY);
    headers.remove(X_FRAME_OPTIONS);

    if let Some(location) = location {
        headers.insert(LOCATION, location);
    }

    headers
}
