//! Periodic purge of expired rate-limit windows.
//!
//! Without it the limiter table grows by one entry per distinct client and
//! policy for the life of the process.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use shifa_core::rate_limit::{RateLimiter, SWEEP_INTERVAL};
use tokio_util::sync::CancellationToken;

/// Run the sweep loop on [`SWEEP_INTERVAL`] until `cancel` fires.
pub async fn run(limiter: Arc<RateLimiter>, cancel: CancellationToken) {
    run_every(limiter, SWEEP_INTERVAL, cancel).await;
}

/// [`run`] with an explicit period.
pub async fn run_every(limiter: Arc<RateLimiter>, period: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = period.as_secs(), "Rate limit sweep started");

    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Rate limit sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let removed = limiter.sweep_expired(Utc::now());
                if removed > 0 {
                    tracing::info!(removed, remaining = limiter.len(), "Rate limit sweep: purged windows");
                } else {
                    tracing::debug!("Rate limit sweep: nothing to purge");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use shifa_core::rate_limit::RateLimitPolicy;

    use super::*;

    #[tokio::test]
    async fn sweep_purges_expired_windows_and_stops_on_cancel() {
        let limiter = Arc::new(RateLimiter::new());
        let long_ago = Utc::now() - chrono::Duration::hours(2);
        limiter.check_at("203.0.113.9", &RateLimitPolicy::FORM, long_ago);
        limiter.check("198.51.100.4", &RateLimitPolicy::AUTH);
        assert_eq!(limiter.len(), 2);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_every(
            Arc::clone(&limiter),
            Duration::from_millis(10),
            cancel.clone(),
        ));

        // The first tick fires immediately.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(limiter.len(), 1);

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweep stops after cancel")
            .unwrap();
    }
}
