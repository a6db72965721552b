use crate::domain::ports::ClockRef;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Limits for a fixed-window rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Hits allowed per key within one window.
    pub max_requests: u32,
    /// Length of a window, starting at the first hit.
    pub window: TimeDelta,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: TimeDelta::minutes(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: TimeDelta },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    hits: u32,
}

/// Per-key fixed-window throttling with an injected clock.
///
/// Each limiter owns its own map, so separate endpoints get separate budgets.
pub struct RateLimiter {
    config: RateLimitConfig,
    clock: ClockRef,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, clock: ClockRef) -> Self {
        Self {
            config,
            clock,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records a hit for `key` and decides whether it may proceed.
    ///
    /// Limited hits are not counted against the window.
    pub async fn check(&self, key: &str) -> RateDecision {
        let now = self.clock.now();
        let mut windows = self.windows.lock().await;

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            hits: 0,
        });
        if now - window.started_at >= self.config.window {
            *window = Window {
                started_at: now,
                hits: 0,
            };
        }

        if window.hits >= self.config.max_requests {
            let retry_after = window
                .started_at
                .checked_add_signed(self.config.window)
                .map_or(TimeDelta::MAX, |ends_at| ends_at - now);
            tracing::debug!(key, retry_after_ms = retry_after.num_milliseconds(), "rate limited");
            return RateDecision::Limited { retry_after };
        }

        window.hits += 1;
        RateDecision::Allowed {
            remaining: self.config.max_requests - window.hits,
        }
    }

    /// Drops windows that have fully elapsed. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, window| now - window.started_at < self.config.window);
        before - windows.len()
    }

    /// Number of keys currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.len()
    }
}
