//! Use cases - custody workflows, guarded CRUD and reports.
//!
//! Each module owns one concern. Handlers call these; nothing here knows
//! about HTTP.

pub mod custody;
pub mod deletion;
pub mod error;
pub mod lifecycle;
pub mod management;
pub mod reports;
pub mod validation;

pub use custody::AssignmentCoordinator;
pub use deletion::DeletionGuard;
pub use error::CoreError;
pub use lifecycle::RefreshAmmunitionStatus;
pub use management::ManagementUseCases;
pub use reports::{InventoryOverview, Reports};
pub use validation::ReferenceValidator;
