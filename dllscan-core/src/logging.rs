//! Structured logging using **tracing**.
//!
//! Events go to stderr as JSON so stdout stays reserved for the run summary.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "dllscan_core=debug,dllscan=debug"
    } else {
        "warn"
    }
}

/// Initializes the global tracing subscriber.
///
/// Call *once* at program start. `RUST_LOG` takes precedence over the
/// `verbose` default (e.g. `RUST_LOG=dllscan_core=trace`).
pub fn init_structured_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A subscriber may already be installed (tests, embedding hosts).
    let _ = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert!(default_directive(true).contains("dllscan_core=debug"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_structured_logging(false);
        init_structured_logging(true);
    }
}
