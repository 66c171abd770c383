use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_DIRECTIVE: &str = "finance_recurrence=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber once. `RUST_LOG` takes precedence
/// over `directive`.
pub fn init_tracing(directive: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive));

        // another subscriber may already be installed by the host application
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
