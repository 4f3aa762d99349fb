//! Tracing/log initialization, in the style of the teacher's
//! `src/observability/tracing.rs`: a single `init` call the binary makes
//! once at startup, controlled entirely by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber. Safe to call more than
/// once; subsequent calls are no-ops (`set_global_default` failures are
/// swallowed since they only happen when a subscriber is already set,
/// e.g. in tests that exercise `main`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
