//! Common utility functions shared across the domain and engine crates.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Minimal dependencies** - only chrono for calendar dates

pub mod date;
pub mod patch;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use date::{format_iso_date, parse_iso_date, require_not_before};
pub use patch::double_option;
pub use string::{required_text, trimmed};
