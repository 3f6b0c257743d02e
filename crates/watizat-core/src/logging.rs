//! Logging init: structured output on stderr, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Default filter per verbosity: quiet < normal < verbose
fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "warn,watizat=debug,watizat_core=debug"
    } else {
        "warn"
    }
}

/// Initialize logging to stderr. `RUST_LOG` wins over the flags.
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(verbose)
        .try_init();
}
