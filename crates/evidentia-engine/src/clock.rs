//! Wall-clock abstraction.
//!
//! Every mutating operation stamps a timestamp taken from an injected
//! clock rather than reading the system time inline, so tests can pin
//! time and deployments control precision in one place.

use chrono::Utc;
use evidentia_canonical::Timestamp;

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    /// Returns the current time as a canonical timestamp.
    fn now(&self) -> Timestamp;
}

/// System clock emitting millisecond precision.
///
/// Timestamp ordering is lexicographic, so all producers in a deployment
/// must agree on the sub-second precision; this clock fixes it at three
/// digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
    }
}
