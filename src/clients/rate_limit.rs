//! Client-side request throttling.
//!
//! [`RateLimiter`] enforces two independent limits before a request is
//! dispatched:
//!
//! - at most `max_requests` dispatches in any sliding window of
//!   `per_milliseconds`
//! - at most `max_concurrent` requests in flight
//!
//! Requests over either limit wait for their turn; they are never rejected.
//! Waiters are served in the order they arrived.
//!
//! # Example
//!
//! ```rust
//! use bling_api::RateLimitOptions;
//!
//! // Bling allows 3 requests per second per account.
//! let options = RateLimitOptions::per_second(3).with_max_concurrent(2);
//! assert!(options.validate().is_ok());
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

use crate::error::ConfigError;

/// Window used when `max_requests` is set without `per_milliseconds`.
pub const DEFAULT_WINDOW_MILLISECONDS: u64 = 1000;

/// Throttling options for the transport client.
///
/// Every field is optional; a limit that is not set is not enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimitOptions {
    /// Maximum number of requests dispatched per window.
    pub max_requests: Option<u32>,
    /// Window length in milliseconds.
    pub per_milliseconds: Option<u64>,
    /// Maximum number of requests in flight at once.
    pub max_concurrent: Option<usize>,
}

impl RateLimitOptions {
    /// Limits dispatch to `max_requests` per `per_milliseconds`.
    #[must_use]
    pub const fn new(max_requests: u32, per_milliseconds: u64) -> Self {
        Self {
            max_requests: Some(max_requests),
            per_milliseconds: Some(per_milliseconds),
            max_concurrent: None,
        }
    }

    /// Limits dispatch to `max_requests` per second.
    #[must_use]
    pub const fn per_second(max_requests: u32) -> Self {
        Self::new(max_requests, DEFAULT_WINDOW_MILLISECONDS)
    }

    /// Limits only the number of requests in flight.
    #[must_use]
    pub const fn concurrent(max_concurrent: usize) -> Self {
        Self {
            max_requests: None,
            per_milliseconds: None,
            max_concurrent: Some(max_concurrent),
        }
    }

    /// Adds a concurrency limit to these options.
    #[must_use]
    pub const fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = Some(max_concurrent);
        self
    }

    /// Returns the effective window, if a request-count limit is set.
    #[must_use]
    pub fn window(&self) -> Option<Duration> {
        self.max_requests.map(|_| {
            Duration::from_millis(self.per_milliseconds.unwrap_or(DEFAULT_WINDOW_MILLISECONDS))
        })
    }

    /// Checks that every configured limit is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRateLimit`] if a limit is zero or if
    /// `per_milliseconds` is set without `max_requests`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidRateLimit {
            reason: reason.to_string(),
        };

        if self.max_requests == Some(0) {
            return Err(invalid("max_requests must be greater than zero"));
        }
        if self.per_milliseconds == Some(0) {
            return Err(invalid("per_milliseconds must be greater than zero"));
        }
        if self.per_milliseconds.is_some() && self.max_requests.is_none() {
            return Err(invalid("per_milliseconds requires max_requests"));
        }
        if self.max_concurrent == Some(0) {
            return Err(invalid("max_concurrent must be greater than zero"));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct SlidingWindow {
    max_requests: usize,
    period: Duration,
    dispatched: Mutex<VecDeque<Instant>>,
}

impl SlidingWindow {
    /// Waits until a dispatch fits in the window and records it.
    ///
    /// The lock is held while sleeping, so later callers queue behind the
    /// current one in arrival order.
    async fn wait_turn(&self) {
        let mut dispatched = self.dispatched.lock().await;
        loop {
            let now = Instant::now();
            while dispatched
                .front()
                .is_some_and(|sent| now.duration_since(*sent) >= self.period)
            {
                dispatched.pop_front();
            }

            if dispatched.len() < self.max_requests {
                dispatched.push_back(now);
                return;
            }

            let Some(oldest) = dispatched.front().copied() else {
                continue;
            };
            let wait = self.period.saturating_sub(now.duration_since(oldest));
            tracing::debug!(
                "Rate limit of {} requests per {:?} reached, delaying dispatch by {:?}",
                self.max_requests,
                self.period,
                wait
            );
            tokio::time::sleep(wait).await;
        }
    }
}

/// Shared throttle state owned by one transport client.
///
/// Cheap to share behind the client; all mutation is serialized internally.
#[derive(Debug)]
pub struct RateLimiter {
    window: Option<SlidingWindow>,
    in_flight: Option<Arc<Semaphore>>,
}

/// Proof that a request may be dispatched.
///
/// Holds a concurrency slot (if limited) until dropped.
#[derive(Debug)]
pub struct RateLimitPermit {
    _slot: Option<OwnedSemaphorePermit>,
}

impl RateLimiter {
    /// Creates a limiter from already validated options.
    #[must_use]
    pub fn new(options: &RateLimitOptions) -> Self {
        let window = options.max_requests.zip(options.window()).map(|(max, period)| {
            SlidingWindow {
                max_requests: max as usize,
                period,
                dispatched: Mutex::new(VecDeque::new()),
            }
        });
        let in_flight = options
            .max_concurrent
            .map(|max| Arc::new(Semaphore::new(max)));

        Self { window, in_flight }
    }

    /// Waits until a request may be dispatched.
    ///
    /// The concurrency slot is taken first so the window records the actual
    /// dispatch time rather than the time the request was queued.
    pub async fn acquire(&self) -> RateLimitPermit {
        let slot = match &self.in_flight {
            Some(semaphore) => Arc::clone(semaphore).acquire_owned().await.ok(),
            None => None,
        };

        if let Some(window) = &self.window {
            window.wait_turn().await;
        }

        RateLimitPermit { _slot: slot }
    }

    /// Returns the number of free concurrency slots, if concurrency is limited.
    #[must_use]
    pub fn available_slots(&self) -> Option<usize> {
        self.in_flight.as_ref().map(|s| s.available_permits())
    }
}
