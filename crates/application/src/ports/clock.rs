//! Clock port

use chrono::{DateTime, Utc};

/// Port for reading the current time.
///
/// Token expiry is computed against this rather than the system clock
/// directly, so expiry behavior is testable with a fixed timestamp.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
