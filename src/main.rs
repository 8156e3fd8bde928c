// Lusakey — Application Entry Point
//
// Parses CLI arguments, initializes structured logging (which never records
// secret values or the master password), and dispatches to the command
// handler. The tokio runtime drives the clipboard clear timers.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lusakey::cli::{execute, Cli};

#[tokio::main]
async fn main() {
    // RUST_LOG=lusakey=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lusakey=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
