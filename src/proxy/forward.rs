//! Single-attempt forwarding of a request to its matched upstream.
//!
//! The target URL is the upstream base plus the path left after removing
//! the matched prefix, with the client's query string carried over. The
//! request body is handed to the client as a stream, so it is never held
//! in memory. Redirects are returned as-is for the response transformer;
//! the hyper client never follows them.
//!
//! Dropping the future returned by [`forward`] (for instance when the
//! client disconnects and axum drops the handler) aborts the upstream call.

use std::time::{Duration, Instant};

use axum::body::Body;
use http::request::Parts;
use url::Url;

use crate::config::model::MatchResult;
use crate::error::UpstreamError;
use crate::server::HttpClient;

use super::headers::build_forwarded_headers;
use super::origin::InboundOrigin;

pub struct ForwardRequest<'a> {
    pub client: &'a HttpClient,
    pub matched: MatchResult<'a>,
    pub inbound: &'a Parts,
    pub origin: &'a InboundOrigin,
    pub client_ip: &'a str,
    pub timeout: Duration,
    pub correlation_id: &'a str,
}

#[derive(Debug)]
pub struct Forwarded {
    pub target: Url,
    pub response: hyper::Response<hyper::body::Incoming>,
}

/// Build the upstream URL for an inbound path and query.
pub fn build_target_url(
    matched: MatchResult<'_>,
    path: &str,
    query: Option<&str>,
) -> Result<Url, UpstreamError> {
    let target = format!("{}{}", matched.upstream, matched.remaining_path(path));
    let mut url = Url::parse(&target).map_err(|source| UpstreamError::InvalidTarget {
        url: target.clone(),
        source,
    })?;
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

pub async fn forward(req: ForwardRequest<'_>, body: Body) -> Result<Forwarded, UpstreamError> {
    let target = build_target_url(req.matched, req.inbound.uri.path(), req.inbound.uri.query())?;

    tracing::info!(
        correlation_id = %req.correlation_id,
        method = %req.inbound.method,
        path = %req.inbound.uri.path(),
        target = %target,
        "proxying request"
    );

    let forwarded_headers =
        build_forwarded_headers(&req.inbound.headers, &target, req.client_ip, req.origin);

    let mut builder = hyper::Request::builder()
        .method(req.inbound.method.clone())
        .uri(target.as_str());
    if let Some(headers) = builder.headers_mut() {
        *headers = forwarded_headers;
    }
    let upstream_req = builder.body(body)?;

    let start = Instant::now();
    let response = tokio::time::timeout(req.timeout, req.client.request(upstream_req))
        .await
        .map_err(|_| UpstreamError::Timeout(req.timeout))??;

    tracing::debug!(
        correlation_id = %req.correlation_id,
        status = response.status().as_u16(),
        latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        "upstream responded"
    );

    Ok(Forwarded { target, response })
}
