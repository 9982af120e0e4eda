//! Per-client submission throttling.
//!
//! Counters live in process memory only; they are lost on restart and stale
//! entries are never evicted. Both limitations are accepted for the current
//! single-instance deployment.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Gate checked before any other submission work happens.
pub trait RateLimitStore: Send + Sync {
    /// Returns `true` if the client identified by `key` is still within its
    /// window, incrementing the counter as a side effect.
    fn check_and_increment(&self, key: &str) -> bool;
}

#[derive(Debug, Clone)]
struct Entry {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window counter per client identifier.
pub struct InMemoryRateLimiter {
    entries: Mutex<HashMap<String, Entry>>,
    max_requests: u32,
    window: Duration,
}

impl InMemoryRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Check-and-increment against an explicit clock reading, so tests can
    /// drive window expiry deterministically.
    pub fn check_and_increment_at(&self, key: &str, now: Instant) -> bool {
        // A poisoned lock only means another request panicked mid-update;
        // the map itself is still usable.
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };

        match entries.get_mut(key) {
            Some(entry) if now < entry.reset_at => {
                if entry.count < self.max_requests {
                    entry.count += 1;
                    true
                } else {
                    false
                }
            }
            _ => {
                entries.insert(
                    key.to_string(),
                    Entry {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}

impl RateLimitStore for InMemoryRateLimiter {
    fn check_and_increment(&self, key: &str) -> bool {
        self.check_and_increment_at(key, Instant::now())
    }
}
