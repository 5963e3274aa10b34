//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`routes`]. Both resolve the route
//! table the same way through [`route_table`], so `routes` reports
//! exactly what `run` would serve.

pub mod routes;
pub mod run;

use crate::cli::{Cli, Commands, UpstreamArgs};
use crate::config::upstreams::parse_upstream_arg;
use crate::config::RouteTable;
use crate::error::GatewayError;

pub async fn dispatch(cli: Cli) -> Result<(), GatewayError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Routes(ref args)) => routes::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

/// The built-in table, or the table given with `--upstream KEY=HOST`.
pub fn route_table(args: &UpstreamArgs) -> Result<RouteTable, GatewayError> {
    if args.upstreams.is_empty() {
        return RouteTable::builtin();
    }

    let pairs = args
        .upstreams
        .iter()
        .map(|arg| {
            parse_upstream_arg(arg).ok_or_else(|| GatewayError::UpstreamArgument(arg.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    RouteTable::from_hosts(&pairs)
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  pathgate v{version} \u{2014} path-prefix reverse proxy\n\n  \
         No command provided. To get started:\n\n    \
         pathgate run                      Start the proxy with the built-in upstreams\n    \
         pathgate routes                   Show which prefix goes where\n    \
         pathgate --help                   See all commands and options\n"
    );
}
