//! Trusted time acquisition.
//!
//! The whole point of the container is that the holder's clock cannot
//! unlock it early, so "now" must come from an authority the local user
//! cannot roll back. The authority is pluggable behind [`TrustedClock`]:
//! production uses [`SntpClock`], tests use [`FixedClock`].

mod sntp;

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use sntp::{DEFAULT_NTP_SERVER, DEFAULT_TIMEOUT, SntpClock};

/// A source of current UTC time that is independent of the local clock.
///
/// # Invariants
///
/// - Implementations MUST NOT fall back to the local clock; a failed
///   query is an error, not an approximation
/// - Each call re-queries the authority; results are never cached, so a
///   stale "already unlocked" answer cannot be replayed
pub trait TrustedClock {
    /// Current UTC time, at least second precision.
    fn now_utc(&self) -> Result<DateTime<Utc>, TimeError>;
}

/// Failures while acquiring trusted time.
///
/// All variants are fatal for the surrounding open attempt; retry
/// policy, if any, belongs to the front end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Socket-level failure reaching the authority
    #[error("time authority query failed: {0}")]
    Network(String),

    /// The authority did not answer within the bound
    #[error("time authority query timed out after {timeout:?}")]
    Timeout {
        /// Configured bound for the whole exchange
        timeout: Duration,
    },

    /// The authority answered with something unusable
    #[error("malformed time authority response: {0}")]
    MalformedResponse(&'static str),
}

/// A clock pinned to one instant.
///
/// For tests and deterministic tooling; never use in production, it
/// defeats the time lock entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl TrustedClock for FixedClock {
    fn now_utc(&self) -> Result<DateTime<Utc>, TimeError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_its_instant() {
        let instant = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = FixedClock(instant);

        assert_eq!(clock.now_utc(), Ok(instant));
        // Repeated queries stay pinned
        assert_eq!(clock.now_utc(), Ok(instant));
    }
}
