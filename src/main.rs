//! Magpie UCI chess engine main entry point.

use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the protocol, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    magpie::init();

    if let Err(e) = magpie::uci::run_uci_loop() {
        tracing::error!(error = %e, "UCI loop failed");
        std::process::exit(1);
    }
}
