//! pathgate is a path-prefix reverse proxy.
//!
//! Each request is routed by its leading path segment (`/d1`, `/i3`, ...)
//! to one of a fixed set of upstream hosts. The prefix is stripped before
//! forwarding, CORS headers are injected into every response, `OPTIONS`
//! preflights are answered locally, and redirects that stay on the
//! upstream's origin are rewritten to point back through the proxy.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, routes).
//! - [`config`] -- The startup-time route table, its validation, and the
//!   built-in upstream mapping.
//! - [`error`] -- Startup and upstream error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`proxy`] -- Core request handling: prefix matching, header
//!   construction, upstream forwarding, and response transformation.
//! - [`server`] -- Axum server setup, shared application state, HTTP client, and
//!   graceful shutdown.

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod proxy;
pub mod server;
