//! Shared HTTP Client Module
//!
//! Provides a global, lazy-initialized HTTP client for extraction requests.
//! Every file in a batch reuses the same pooled connections, so a worker pool
//! of N only ever opens N connections to the API host.

use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Request timeout applied when no explicit timeout is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Global HTTP client for extraction API calls
///
/// - 120s timeout, vision requests with large inline images are slow
/// - 16 idle connections per host for parallel batches
/// - 90s idle timeout
static EXTRACTION_CLIENT: Lazy<Client> = Lazy::new(|| {
    build_client(DEFAULT_TIMEOUT).unwrap_or_else(|e| {
        tracing::warn!("Falling back to default HTTP client: {}", e);
        Client::new()
    })
});

/// Build a client with the pool settings used for extraction requests
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(16)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .build()
}

/// Get the global extraction HTTP client
///
/// The client is created on first access and reused for all subsequent calls.
#[inline]
pub fn extraction_client() -> &'static Client {
    &EXTRACTION_CLIENT
}
