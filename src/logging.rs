//! Diagnostic tracing for the engine.
//!
//! Program output owns stdout, so all tracing goes to stderr. Filtering
//! comes from `RUST_LOG` and defaults to `warn`.
//!
//! ```bash
//! RUST_LOG=bf_engine=debug bf run --file hello.bf
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
