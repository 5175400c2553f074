//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{
        AmmunitionRepo, AssignmentRepo, ClockPort, CustodyRepo, FacilityRepo, MaintenanceRepo,
        ManufacturerRepo, ReferenceRepo, ReportRepo, SoldierRepo, UnitRepo, WeaponRepo,
    },
    sqlite::SqliteRepositories,
};
use crate::use_cases::{
    management, AssignmentCoordinator, DeletionGuard, ManagementUseCases, ReferenceValidator,
    RefreshAmmunitionStatus, Reports,
};

/// Main application state.
///
/// Owns the store handles and every use case. Passed to HTTP handlers via
/// Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all store ports.
pub struct Repositories {
    pub manufacturer: Arc<dyn ManufacturerRepo>,
    pub unit: Arc<dyn UnitRepo>,
    pub facility: Arc<dyn FacilityRepo>,
    pub weapon: Arc<dyn WeaponRepo>,
    pub soldier: Arc<dyn SoldierRepo>,
    pub assignment: Arc<dyn AssignmentRepo>,
    pub custody: Arc<dyn CustodyRepo>,
    pub maintenance: Arc<dyn MaintenanceRepo>,
    pub ammunition: Arc<dyn AmmunitionRepo>,
    pub reference: Arc<dyn ReferenceRepo>,
    pub report: Arc<dyn ReportRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub custody: Arc<AssignmentCoordinator>,
    pub deletion: Arc<DeletionGuard>,
    pub refresh_ammunition: RefreshAmmunitionStatus,
    pub management: ManagementUseCases,
    pub reports: Reports,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: SqliteRepositories, clock: Arc<dyn ClockPort>) -> Self {
        let repositories = Repositories {
            manufacturer: repos.manufacturer,
            unit: repos.unit,
            facility: repos.facility,
            weapon: repos.weapon,
            soldier: repos.soldier,
            assignment: repos.assignment.clone(),
            custody: repos.assignment,
            maintenance: repos.maintenance,
            ammunition: repos.ammunition,
            reference: repos.reference,
            report: repos.report,
        };

        let validator = Arc::new(ReferenceValidator::new(repositories.reference.clone()));
        let guard = Arc::new(DeletionGuard::new(repositories.reference.clone()));
        let coordinator = Arc::new(AssignmentCoordinator::new(
            repositories.assignment.clone(),
            repositories.custody.clone(),
            validator.clone(),
            clock.clone(),
        ));

        let management = ManagementUseCases::new(
            management::ManufacturerCrud::new(repositories.manufacturer.clone(), guard.clone()),
            management::UnitCrud::new(repositories.unit.clone(), guard.clone()),
            management::FacilityCrud::new(repositories.facility.clone(), guard.clone()),
            management::WeaponCrud::new(
                repositories.weapon.clone(),
                validator.clone(),
                guard.clone(),
                coordinator.locks(),
            ),
            management::SoldierCrud::new(
                repositories.soldier.clone(),
                validator.clone(),
                guard.clone(),
            ),
            management::AssignmentCrud::new(repositories.assignment.clone(), coordinator.clone()),
            management::MaintenanceCrud::new(
                repositories.maintenance.clone(),
                validator.clone(),
                guard.clone(),
                clock.clone(),
            ),
            management::AmmunitionCrud::new(
                repositories.ammunition.clone(),
                validator,
                guard.clone(),
                clock.clone(),
            ),
        );

        let use_cases = UseCases {
            custody: coordinator,
            deletion: guard,
            refresh_ammunition: RefreshAmmunitionStatus::new(
                repositories.ammunition.clone(),
                clock,
            ),
            management,
            reports: Reports::new(repositories.report.clone()),
        };

        Self {
            repositories,
            use_cases,
        }
    }
}
