//! Armory Engine library.
//!
//! Custody core, SQLite entity store and HTTP surface for tracking who holds
//! which weapon.
//!
//! ## Structure
//!
//! - `use_cases/` - custody coordinator, deletion guard, CRUD, reports
//! - `infrastructure/` - store ports and their SQLite adapters
//! - `api/` - HTTP entry points
//! - `app` - application composition
//! - `config` - environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end custody scenarios against an in-memory SQLite store.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
