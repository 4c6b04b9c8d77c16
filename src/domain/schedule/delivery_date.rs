//! Absolute delivery timestamps

use std::fmt;
use std::str::FromStr;
use std::time::{Duration as StdDuration, SystemTime, UNIX_EPOCH};

use tracing::warn;

use super::Duration;

/// A point in time, in seconds since the Unix epoch, at which a
/// notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DeliveryDate(f64);

impl DeliveryDate {
    pub const fn from_epoch_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// A delivery date `delay` after the current time
    pub fn after(delay: Duration) -> Self {
        Self(epoch_now() + delay.as_millis() as f64 / 1000.0)
    }

    pub const fn epoch_secs(&self) -> f64 {
        self.0
    }

    /// Time left until delivery as seen from `now` (epoch seconds).
    ///
    /// Returns `None` when the date is now or in the past; a stale date
    /// means "deliver immediately", never an error. So does a date too
    /// far out to be represented as a wait.
    pub fn interval_from(&self, now: f64) -> Option<StdDuration> {
        let remaining = self.0 - now;
        if remaining <= 0.0 || remaining.is_nan() {
            return None;
        }
        match StdDuration::try_from_secs_f64(remaining) {
            Ok(interval) => Some(interval),
            Err(e) => {
                warn!(delivery_date = self.0, error = %e, "delivery date out of range, delivering now");
                None
            }
        }
    }

    /// Time left until delivery from the current wall clock
    pub fn interval(&self) -> Option<StdDuration> {
        self.interval_from(epoch_now())
    }
}

impl FromStr for DeliveryDate {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<f64>().map(Self)
    }
}

impl fmt::Display for DeliveryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current wall clock in epoch seconds
pub fn epoch_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
