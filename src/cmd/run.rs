//! `pathgate run`: start the proxy server.
//!
//! Builds the route table (failing before the listener is bound if any
//! entry is invalid), wires it into [`AppState`] together with the HTTP
//! client and client-IP source, and serves until Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;

use crate::cli::RunArgs;
use crate::error::{GatewayError, ValidationError};
use crate::logging;
use crate::proxy::client_ip::{ClientIpSource, HeaderThenPeer, PeerThenHeader};
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), GatewayError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let routes = super::route_table(&args.upstreams)?;
    let client_ip = client_ip_source(&args.client_ip_header)?;

    let route_count = routes.len();
    let state = Arc::new(AppState {
        routes,
        http_client: server::build_http_client(),
        client_ip,
        upstream_timeout: Duration::from_millis(args.timeout),
    });

    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        routes = route_count,
        timeout_ms = args.timeout,
        "pathgate started"
    );

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(server::shutdown_signal())
    .await?;

    tracing::info!("pathgate stopped");
    Ok(())
}

/// A configured edge header takes precedence over the peer address; an
/// empty value means the proxy is exposed directly and only the peer is
/// used.
fn client_ip_source(raw: &str) -> Result<Box<dyn ClientIpSource>, GatewayError> {
    Ok(match client_ip_header(raw)? {
        Some(header) => Box::new(HeaderThenPeer::new(header)),
        None => Box::new(PeerThenHeader::new(None)),
    })
}

fn client_ip_header(raw: &str) -> Result<Option<HeaderName>, GatewayError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<HeaderName>().map(Some).map_err(|_| {
        GatewayError::configuration(ValidationError {
            entry: "(root)".into(),
            field: "client-ip-header".into(),
            message: format!("'{raw}' is not a valid header name"),
            suggestion: None,
        })
    })
}
