//! Upstream response → client response.
//!
//! Status, reason phrase, and headers are carried over, then the header
//! set is adjusted by [`build_response_headers`] and any same-origin
//! redirect is mapped back under the proxy prefix. The upstream body is
//! wrapped, not read, so large and streaming payloads pass straight
//! through.

use axum::body::{Body, HttpBody};
use axum::response::Response;
use axum::BoxError;
use bytes::Bytes;
use url::Url;

use crate::config::model::MatchResult;

use super::headers::build_response_headers;
use super::origin::InboundOrigin;
use super::redirect::rewrite_location;

pub fn transform<B>(
    upstream: hyper::Response<B>,
    matched: MatchResult<'_>,
    target_url: &Url,
    inbound: &InboundOrigin,
) -> Response
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let (parts, body) = upstream.into_parts();

    let proxy_origin = inbound.origin();
    let location = rewrite_location(
        parts.status,
        &parts.headers,
        target_url,
        matched,
        proxy_origin.as_deref(),
    );
    let headers = build_response_headers(&parts.headers, location);

    let mut response = Response::new(Body::new(body));
    *response.status_mut() = parts.status;
    *response.headers_mut() = headers;
    if let Some(reason) = parts.extensions.get::<hyper::ext::ReasonPhrase>() {
        response.extensions_mut().insert(reason.clone());
    }
    response
}
