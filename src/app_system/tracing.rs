use tracing_subscriber::EnvFilter;

use super::config::StoreConfig;

/// Installs the global subscriber. Call once, at startup.
///
/// ```bash
/// RUST_LOG=debug cargo run                            # every request and snapshot
/// RUST_LOG=storefront::checkout=debug cargo run       # just the checkout flow
/// ```
pub fn setup_tracing(config: &StoreConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
