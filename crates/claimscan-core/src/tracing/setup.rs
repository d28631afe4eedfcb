//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the claimscan tracing/logging system.
///
/// Reads `CLAIMSCAN_LOG` for per-module log levels, e.g.
/// `CLAIMSCAN_LOG=claimscan_analysis::ingest=debug,claimscan_cli=info`.
///
/// Falls back to `info` for the claimscan crates if `CLAIMSCAN_LOG` is
/// unset or invalid.
/// Calling it more than once is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = resolve_filter(std::env::var("CLAIMSCAN_LOG").ok().as_deref());

        // A host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Build the filter for a raw `CLAIMSCAN_LOG` value.
///
/// An unset, blank, or unparsable value yields [`default_directives`].
pub fn resolve_filter(raw: Option<&str>) -> EnvFilter {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives()))
}

pub fn default_directives() -> &'static str {
    "claimscan_core=info,claimscan_analysis=info,claimscan_cli=info"
}
