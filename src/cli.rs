//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, routes), and their argument structs. Every `run`
//! flag has an environment variable equivalent for container
//! deployments.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "pathgate",
    version,
    about = "Path-prefix reverse proxy with CORS injection and redirect rewriting",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        pathgate run                          Serve the built-in route table on :3000\n  \
        pathgate run -p 8080 --pretty         Local dev mode\n  \
        pathgate routes                       Show the effective route table"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server
    Run(Box<RunArgs>),

    /// Print the route table without starting
    Routes(RoutesArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct UpstreamArgs {
    /// Replace the built-in upstreams (repeatable, KEY=HOST → /KEY → https://HOST)
    #[arg(short, long = "upstream", value_name = "KEY=HOST")]
    pub upstreams: Vec<String>,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        pathgate run                                            Built-in upstreams\n  \
        pathgate run -p 8080 --pretty                           Local dev mode\n  \
        pathgate run -u d1=d1.api.example.com -u i1=i1.api.example.com   Custom upstreams")]
pub struct RunArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[command(flatten)]
    pub upstreams: UpstreamArgs,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Upstream response timeout in milliseconds
    #[arg(
        long,
        env = "UPSTREAM_TIMEOUT_MS",
        default_value_t = 30_000,
        help_heading = "Tuning"
    )]
    pub timeout: u64,

    /// Edge header trusted for the client IP before the peer address (empty: peer only)
    #[arg(
        long,
        env = "CLIENT_IP_HEADER",
        default_value = crate::proxy::client_ip::DEFAULT_CLIENT_IP_HEADER,
        help_heading = "Tuning"
    )]
    pub client_ip_header: String,
}

#[derive(Args)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub upstreams: UpstreamArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
