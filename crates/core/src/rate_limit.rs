//! Fixed-window, in-memory rate limiting keyed by client identifier.
//!
//! Windows live for the lifetime of the process and are not shared across
//! instances. Expired windows are removed by [`RateLimiter::sweep_expired`],
//! which the server runs on [`SWEEP_INTERVAL`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::types::Timestamp;

/// How often the server purges expired windows.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Fallback identifier when no client address header is present.
pub const UNKNOWN_CLIENT: &str = "unknown-client";

/// A named window length and request budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Namespaces the counters so policies never share a window.
    pub name: &'static str,
    pub interval: Duration,
    pub max_requests: u32,
}

impl RateLimitPolicy {
    /// Login attempts: 5 per 15 minutes.
    pub const AUTH: RateLimitPolicy = RateLimitPolicy {
        name: "auth",
        interval: Duration::from_secs(15 * 60),
        max_requests: 5,
    };

    /// Public form submissions: 3 per minute.
    pub const FORM: RateLimitPolicy = RateLimitPolicy {
        name: "form",
        interval: Duration::from_secs(60),
        max_requests: 3,
    };

    /// General API reads: 60 per minute.
    pub const API: RateLimitPolicy = RateLimitPolicy {
        name: "api",
        interval: Duration::from_secs(60),
        max_requests: 60,
    };

    /// Media uploads: 10 per hour.
    pub const UPLOAD: RateLimitPolicy = RateLimitPolicy {
        name: "upload",
        interval: Duration::from_secs(60 * 60),
        max_requests: 10,
    };
}

/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitDecision {
    pub success: bool,
    pub limit: u32,
    pub remaining: u32,
    /// When the current window ends.
    pub reset: Timestamp,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, rounded up.
    pub fn retry_after_secs(&self, now: Timestamp) -> u64 {
        let millis = (self.reset - now).num_milliseconds().max(0) as u64;
        millis.div_ceil(1000)
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Timestamp,
}

/// Process-wide table of fixed windows.
#[derive(Debug, Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request from `identifier` against `policy`.
    pub fn check(&self, identifier: &str, policy: &RateLimitPolicy) -> RateLimitDecision {
        self.check_at(identifier, policy, Utc::now())
    }

    /// [`check`](Self::check) with an explicit clock.
    pub fn check_at(
        &self,
        identifier: &str,
        policy: &RateLimitPolicy,
        now: Timestamp,
    ) -> RateLimitDecision {
        let key = format!("{}:{identifier}", policy.name);
        let interval = chrono::Duration::from_std(policy.interval)
            .unwrap_or_else(|_| chrono::Duration::seconds(60));

        let mut windows = self.lock();
        let window = windows.entry(key).or_insert(Window {
            count: 0,
            reset_at: now + interval,
        });

        if window.reset_at < now {
            *window = Window {
                count: 0,
                reset_at: now + interval,
            };
        }

        if window.count >= policy.max_requests {
            return RateLimitDecision {
                success: false,
                limit: policy.max_requests,
                remaining: 0,
                reset: window.reset_at,
            };
        }

        window.count += 1;

        RateLimitDecision {
            success: true,
            limit: policy.max_requests,
            remaining: policy.max_requests - window.count,
            reset: window.reset_at,
        }
    }

    /// Drop every window whose reset time has passed. Returns how many went.
    pub fn sweep_expired(&self, now: Timestamp) -> usize {
        let mut windows = self.lock();
        let before = windows.len();
        windows.retain(|_, w| w.reset_at >= now);
        before - windows.len()
    }

    /// Number of live windows (expired ones included until swept).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Window>> {
        // A panic while holding the lock cannot leave a window half-written.
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Pick the caller identifier from proxy headers.
///
/// Uses the first `X-Forwarded-For` entry, then `X-Real-IP`, then
/// [`UNKNOWN_CLIENT`].
pub fn client_identifier(forwarded_for: Option<&str>, real_ip: Option<&str>) -> String {
    if let Some(first) = forwarded_for
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first.to_string();
    }
    if let Some(ip) = real_ip.map(str::trim).filter(|v| !v.is_empty()) {
        return ip.to_string();
    }
    UNKNOWN_CLIENT.to_string()
}
