pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Once;

pub use domain::*;
pub use storage::Repository;

/// Data file used when none is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "expenses.json";

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber, logging to stderr.
/// `RUST_LOG` wins when set; otherwise `verbose` picks debug over warn.
pub fn init_tracing(verbose: bool) {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let default_level = if verbose { "spendbook=debug" } else { "spendbook=warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing(false);
        super::init_tracing(true);
    }
}
