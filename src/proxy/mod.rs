//! Core request handling.
//!
//! The [`proxy_handler`] function is the Axum fallback that receives
//! every request. `OPTIONS` is answered as a CORS preflight; anything
//! else is matched against the route table, forwarded to the selected
//! upstream, and the upstream response is transformed for the client.
//! Submodules handle route matching ([`routing`]), header construction
//! ([`headers`]), upstream calls ([`forward`]), response rewriting
//! ([`transform`], [`redirect`]), and CORS ([`cors`]).

pub mod client_ip;
pub mod cors;
pub mod forward;
pub mod headers;
pub mod origin;
pub mod redirect;
pub mod routing;
pub mod transform;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::server::AppState;

pub const WELCOME_TEXT: &str = "Welcome to the AI Proxy service.";
pub const NOT_CONFIGURED_TEXT: &str = "Proxy target not configured for this path.";
pub const UPSTREAM_FAILED_TEXT: &str = "Proxy request failed.";

const TEXT_PLAIN_UTF8: &str = "text/plain;charset=UTF-8";

fn text_response(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8))],
        body,
    )
        .into_response()
}

fn bad_gateway() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [
            (
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(cors::ALLOW_ORIGIN),
            ),
            (CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8)),
        ],
        UPSTREAM_FAILED_TEXT,
    )
        .into_response()
}

pub async fn proxy_handler(State(state): State<Arc<AppState>>, req: Request) -> Response {
    if req.method() == Method::OPTIONS {
        return cors::preflight_response();
    }

    let (parts, body) = req.into_parts();
    let correlation_id = parts
        .headers
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    let path = parts.uri.path();
    let Some(matched) = state.routes.match_path(path) else {
        if path == "/" {
            return text_response(StatusCode::OK, WELCOME_TEXT);
        }
        tracing::warn!(
            correlation_id = %correlation_id,
            method = %parts.method,
            path = %path,
            "no route matched"
        );
        return text_response(StatusCode::NOT_FOUND, NOT_CONFIGURED_TEXT);
    };

    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_ip = state.client_ip.client_ip(peer, &parts.headers);
    let inbound = origin::InboundOrigin::from_parts(&parts);

    let request = forward::ForwardRequest {
        client: &state.http_client,
        matched,
        inbound: &parts,
        origin: &inbound,
        client_ip: &client_ip,
        timeout: state.upstream_timeout,
        correlation_id: &correlation_id,
    };

    match forward::forward(request, body).await {
        Ok(forwarded) => {
            transform::transform(forwarded.response, matched, &forwarded.target, &inbound)
        }
        Err(e) => {
            tracing::error!(
                correlation_id = %correlation_id,
                path = %path,
                upstream = %matched.upstream,
                error = %e,
                "upstream request failed"
            );
            bad_gateway()
        }
    }
}
