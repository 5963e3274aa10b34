//! Client IP resolution for `X-Forwarded-For`.
//!
//! Which source of the client address can be trusted depends on where
//! the proxy is deployed, so the lookup is a [`ClientIpSource`] injected
//! through [`AppState`](crate::server::AppState) rather than a fixed
//! header name.

use std::net::SocketAddr;

use axum::http::{HeaderMap, HeaderName};

/// Header set by the Netlify edge with the connecting client's address.
pub const DEFAULT_CLIENT_IP_HEADER: &str = "x-nf-client-connection-ip";

pub trait ClientIpSource: Send + Sync {
    /// Resolve the client address; an empty string when unknown.
    fn client_ip(&self, peer: Option<SocketAddr>, headers: &HeaderMap) -> String;
}

/// Connection peer address first, then a trusted header, then nothing.
#[derive(Debug, Clone)]
pub struct PeerThenHeader {
    header: Option<HeaderName>,
}

impl PeerThenHeader {
    #[must_use]
    pub const fn new(header: Option<HeaderName>) -> Self {
        Self { header }
    }
}

impl Default for PeerThenHeader {
    fn default() -> Self {
        Self::new(Some(HeaderName::from_static(DEFAULT_CLIENT_IP_HEADER)))
    }
}

impl ClientIpSource for PeerThenHeader {
    fn client_ip(&self, peer: Option<SocketAddr>, headers: &HeaderMap) -> String {
        if let Some(addr) = peer {
            return addr.ip().to_string();
        }
        header_ip(self.header.as_ref(), headers).unwrap_or_default()
    }
}

/// Trusted edge header first, then the connection peer, then nothing.
///
/// For deployments behind a TLS-terminating edge, where the peer is the
/// edge itself. The header must be one the edge overwrites, or clients
/// can choose their own address.
#[derive(Debug, Clone)]
pub struct HeaderThenPeer {
    header: HeaderName,
}

impl HeaderThenPeer {
    #[must_use]
    pub const fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl ClientIpSource for HeaderThenPeer {
    fn client_ip(&self, peer: Option<SocketAddr>, headers: &HeaderMap) -> String {
        header_ip(Some(&self.header), headers)
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_default()
    }
}

fn header_ip(header: Option<&HeaderName>, headers: &HeaderMap) -> Option<String> {
    header
        .and_then(|name| headers.get(name))
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
