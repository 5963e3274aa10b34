//! `pathgate routes`: print the effective route table.
//!
//! Validates the table exactly as `run` would and lists the entries in
//! match order, as human-readable text or JSON.

use crate::cli::RoutesArgs;
use crate::config::RouteTable;
use crate::error::GatewayError;

pub fn execute(args: &RoutesArgs) -> Result<(), GatewayError> {
    let table = super::route_table(&args.upstreams)?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "routes": table.entries(),
            })
        );
    } else {
        println!("\u{2713} {}", format_route_report(&table));
    }
    Ok(())
}

#[must_use]
pub fn format_route_report(table: &RouteTable) -> String {
    let width = table
        .entries()
        .iter()
        .map(|e| e.prefix().len())
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("{} routes (longest prefix first)\n", table.len())];
    for entry in table.entries() {
        lines.push(format!(
            "  {:<width$}  -> {}",
            entry.prefix(),
            entry.upstream()
        ));
    }
    lines.join("\n")
}
