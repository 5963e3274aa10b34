//! Unified error types for pathgate.
//!
//! [`GatewayError`] covers startup failures (a broken route table, a bad
//! listen address, I/O) and is fatal. [`UpstreamError`] covers a single
//! forwarding attempt and is recovered at the request boundary as a 502.
//! [`ValidationError`] carries per-entry details for configuration
//! failures, with a hint toward a fix where one exists.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub entry: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  {}: {} — {}",
            self.entry, self.field, self.message
        )?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("Route table configuration failed:\n{}", format_errors(.errors))]
    Configuration { errors: Vec<ValidationError> },

    #[error("Invalid upstream argument '{0}' (expected KEY=HOST, e.g. d1=d1.api.example.com)")]
    UpstreamArgument(String),

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    #[must_use]
    pub fn configuration(error: ValidationError) -> Self {
        Self::Configuration {
            errors: vec![error],
        }
    }
}

/// Failure of the single upstream attempt made for a request.
///
/// The message is for server-side logs only; clients always receive the
/// generic 502 body.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UpstreamError {
    #[error("invalid target URL '{url}': {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build upstream request: {0}")]
    Build(#[from] http::Error),

    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("upstream did not respond within {}ms", .0.as_millis())]
    Timeout(Duration),
}
