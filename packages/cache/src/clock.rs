// ABOUTME: Clock abstraction for cache expiry
// ABOUTME: Lets tests drive time explicitly instead of sleeping

use std::time::Instant;

/// Source of the current instant for expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by the monotonic system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
