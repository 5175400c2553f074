//! End-to-end custody tests.
//!
//! Each test builds the complete App over a private in-memory SQLite
//! database with a fixed clock, so they run without any external service:
//!
//! ```bash
//! cargo test -p armory-engine --lib e2e_tests
//! ```

mod e2e_helpers;

mod custody_flow_tests;
mod lifecycle_tests;

pub use e2e_helpers::*;
