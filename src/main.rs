use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = pathgate::cli::Cli::parse();
    if let Err(e) = pathgate::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
