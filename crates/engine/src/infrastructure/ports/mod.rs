//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - Entity store access (SQLite today)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

pub use error::RepoError;
pub use repos::*;
pub use testing::ClockPort;
pub use types::*;

#[cfg(test)]
pub use testing::MockClockPort;
