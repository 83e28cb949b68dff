//! typpy CLI entry point

fn main() {
    // Structured logging on stderr: `RUST_LOG`, then `LOG_LEVEL`, defaulting to warnings.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    typpy::cli::run();
}
