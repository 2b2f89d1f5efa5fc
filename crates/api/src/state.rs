use std::sync::Arc;

use shifa_core::content_store::ContentStore;
use shifa_core::rate_limit::RateLimiter;
use shifa_events::BookingNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via Axum's `State` extractor.
///
/// Must be `Clone` because Axum clones it for each request. Heavy fields are
/// wrapped in `Arc`; `PgPool`, the notifier and `reqwest::Client` are
/// already cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: shifa_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Process-wide fixed-window counters.
    pub rate_limiter: Arc<RateLimiter>,
    /// Lazily-loaded generated landing pages.
    pub content_store: Arc<ContentStore>,
    pub notifier: BookingNotifier,
    /// Outbound client for IP geolocation.
    pub http_client: reqwest::Client,
}
