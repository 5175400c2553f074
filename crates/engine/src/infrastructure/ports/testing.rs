//! Testability ports for injecting time.

use chrono::NaiveDate;

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    /// Calendar date used for defaults and expiry checks.
    fn today(&self) -> NaiveDate;
}
