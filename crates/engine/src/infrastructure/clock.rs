//! Clock implementations.

use crate::infrastructure::ports::ClockPort;
use chrono::{Local, NaiveDate};

/// System clock - the host's local calendar date.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub NaiveDate);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
