//! API layer - HTTP entry points.

pub mod error;
mod extract;
pub mod http;

pub use error::ApiError;
