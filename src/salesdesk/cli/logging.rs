//! Diagnostic logging for the binary.
//!
//! Log lines go to stderr so they never mix with rendered output. The level
//! comes from `RUST_LOG` when set, otherwise from the `--verbose` flag.

use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LEVEL: &str = "warn";
pub const VERBOSE_LEVEL: &str = "salesdesk=debug";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LEVEL
    } else {
        DEFAULT_LEVEL
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
