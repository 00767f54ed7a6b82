// Shared helpers for integration tests

#![allow(dead_code)]

use nocodb_playwright::{BrowserSession, E2eConfig};
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber once per test binary; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Launches a headless Chromium session pointed at `base_url`.
pub async fn launch_session(base_url: &str) -> BrowserSession {
    let config = E2eConfig::new().base_url(base_url);
    BrowserSession::launch(config)
        .await
        .expect("Failed to launch browser session")
}
