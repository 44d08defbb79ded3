//! Per-client fixed-window request limiting.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Shared bucket for requests whose origin cannot be determined.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Identity a request is limited under: the first entry of a comma-separated
/// forwarded-for list from the trusted proxy, else the peer address, else
/// the shared "unknown" bucket.
pub fn client_identity(forwarded_for: Option<&str>, peer_addr: Option<&str>) -> String {
    forwarded_for
        .and_then(|list| list.split(',').next())
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .or_else(|| peer_addr.map(str::trim).filter(|addr| !addr.is_empty()))
        .unwrap_or(UNKNOWN_IDENTITY)
        .to_string()
}

#[derive(Debug)]
struct RateWindow {
    count: u32,
    window_start: Instant,
}

/// Counts requests per identity inside a fixed window.
///
/// A missing or expired window restarts at count 1 and allows the request;
/// otherwise the count is incremented and the request is allowed iff it
/// stays within the per-window maximum.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    windows: Mutex<HashMap<String, RateWindow>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn allow(&self, identity: &str) -> bool {
        self.allow_at(identity, Instant::now())
    }

    pub fn allow_at(&self, identity: &str, now: Instant) -> bool {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match windows.get_mut(identity) {
            Some(window) if now.duration_since(window.window_start) > self.window => {
                window.count = 1;
                window.window_start = now;
                true
            }
            Some(window) => {
                window.count = window.count.saturating_add(1);
                let allowed = window.count <= self.max_requests;
                if !allowed {
                    tracing::debug!(identity, count = window.count, "rate limit exceeded");
                }
                allowed
            }
            None => {
                windows.insert(
                    identity.to_string(),
                    RateWindow {
                        count: 1,
                        window_start: now,
                    },
                );
                true
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_MAX_REQUESTS)
    }
}
