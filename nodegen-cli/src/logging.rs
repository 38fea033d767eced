use tracing_subscriber::EnvFilter;

/// Initialise the global `tracing` subscriber, writing to stderr.
///
/// Respects the `RUST_LOG` environment variable. Falls back to
/// `nodegen_cli=debug` when `verbose` is set and to `warn` otherwise.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("warn,nodegen_cli=debug")
    } else {
        EnvFilter::new("warn")
    }
}
