// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber. Filters come from `RUST_LOG`, falling back to `info`.
/// Log lines go to stderr; stdout stays free for the catalog tooling.
pub fn setup_logging() {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Logging setup complete.");
}

/// An unset, blank or unparsable directive string yields the default filter.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => EnvFilter::try_new(d).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid RUST_LOG '{}': {}", d, e);
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        None => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}
