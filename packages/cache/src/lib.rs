//! Meshport Cache Package
//!
//! Time-boxed caching for read endpoints of the Meshport API clients.
//! The cache is an explicitly constructed object owned by whoever composes
//! the client, with an injected clock so expiry is testable without sleeping.

pub mod clock;
pub mod ttl;

pub use clock::{Clock, SystemClock};
pub use ttl::{CacheConfig, TtlCache};
