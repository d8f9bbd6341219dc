//! Rate limiting for the authentication endpoints
//!
//! Counts requests per client in fixed windows. The first request from a
//! client opens a window; every request inside it increments the counter, and
//! once the counter passes the limit the request is rejected until the window
//! ends. Windows are independent per client identity.
//!
//! # Usage Example
//!
//! ```rust
//! use carelink::core::gateway::rate_limiter::FixedWindowLimiter;
//! use std::time::Duration;
//!
//! let limiter = FixedWindowLimiter::new(5, Duration::from_secs(15 * 60));
//!
//! for _ in 0..5 {
//!     assert!(limiter.check("10.0.0.1").is_allowed());
//! }
//! assert!(!limiter.check("10.0.0.1").is_allowed());
//! assert!(limiter.check("10.0.0.2").is_allowed());
//! ```

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, OriginalUri, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;

use super::error::GatewayError;

const HEADER_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const HEADER_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const HEADER_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Counter state for one client
#[derive(Debug, Clone, Copy)]
struct Window {
    hits: u32,
    resets_at: DateTime<Utc>,
}

/// Result of counting one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub limit: u32,
    /// Hits counted in the current window, including this one
    pub hits: u32,
    pub resets_at: DateTime<Utc>,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        self.hits <= self.limit
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.hits)
    }

    /// Whole seconds until the window ends, rounded up
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.resets_at - now).num_milliseconds().max(0) as u64;
        millis.div_ceil(1000)
    }
}

/// Fixed-window request counter keyed by client identity
#[derive(Debug)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: TimeDelta,
    windows: DashMap<String, Window>,
}

impl FixedWindowLimiter {
    /// Create a limiter allowing `limit` requests per `window` for each client
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window: TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX),
            windows: DashMap::new(),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Count a request for `key` at the current time
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Utc::now())
    }

    /// Count a request for `key` at `now`
    pub fn check_at(&self, key: &str, now: DateTime<Utc>) -> Decision {
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            hits: 0,
            resets_at: self.window_end(now),
        });

        if entry.resets_at <= now {
            *entry = Window {
                hits: 0,
                resets_at: self.window_end(now),
            };
        }

        entry.hits = entry.hits.saturating_add(1);

        Decision {
            limit: self.limit,
            hits: entry.hits,
            resets_at: entry.resets_at,
        }
    }

    fn window_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.window).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Forget the window of one client
    pub fn reset(&self, key: &str) {
        self.windows.remove(key);
    }

    /// Drop every window that ended before `now`, returning how many were removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, window| window.resets_at > now);
        before - self.windows.len()
    }

    /// Number of clients with an open window
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

/// Rate limiter bound to a path prefix
#[derive(Debug)]
pub struct AuthRateLimiter {
    prefix: String,
    trust_proxy: bool,
    limiter: FixedWindowLimiter,
}

impl AuthRateLimiter {
    pub fn new(prefix: impl Into<String>, limiter: FixedWindowLimiter, trust_proxy: bool) -> Self {
        Self {
            prefix: prefix.into(),
            trust_proxy,
            limiter,
        }
    }

    pub fn limiter(&self) -> &FixedWindowLimiter {
        &self.limiter
    }

    /// Whether `path` is the prefix itself or lies below it
    pub fn covers(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Identify the caller: forwarded address when trusted, else the peer address
    pub fn client_key(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        if self.trust_proxy {
            if let Some(ip) = forwarded_ip(headers) {
                return ip.to_string();
            }
        }

        match peer {
            Some(addr) => addr.ip().to_string(),
            None => "unknown".to_string(),
        }
    }
}

/// First hop of `X-Forwarded-For`, if it parses as an address
fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
}

/// Spawn a task that periodically drops ended windows
pub fn spawn_purge_task(limiter: Arc<AuthRateLimiter>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = limiter.limiter().purge_expired(Utc::now());
            if removed > 0 {
                tracing::debug!(removed, "Purged expired rate-limit windows");
            }
        }
    })
}

/// Rate limiting middleware
///
/// Requests outside the configured prefix pass through untouched.
pub async fn rate_limit(
    State(state): State<Arc<AuthRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if !state.covers(&path) {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = state.client_key(request.headers(), peer);

    let now = Utc::now();
    let decision = state.limiter.check_at(&key, now);

    let mut response = if decision.is_allowed() {
        next.run(request).await
    } else {
        tracing::warn!(
            client = %key,
            path = %path,
            hits = decision.hits,
            limit = decision.limit,
            "Auth rate limit exceeded"
        );
        GatewayError::RateLimited {
            retry_after_secs: decision.retry_after_secs(now),
        }
        .into_response()
    };

    let headers = response.headers_mut();
    headers.insert(HEADER_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(HEADER_REMAINING, HeaderValue::from(decision.remaining()));
    headers.insert(
        HEADER_RESET,
        HeaderValue::from(decision.resets_at.timestamp().max(0) as u64),
    );

    response
}
