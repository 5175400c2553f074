//! HTTP routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use armory_domain::{AmmunitionId, AssignmentId, DependentCounts, EntityKind};

use super::error::ApiError;
use super::extract::{IdPath, JsonBody, OptionalJsonBody};
use crate::app::App;
use crate::infrastructure::ports::{
    AmmunitionListing, AssignmentListing, AssignmentRecord, FacilityOccupancy,
    MaintenanceListing, ManufacturerSummary, UnitSummary, WeaponListing,
};
use crate::use_cases::InventoryOverview;

/// Generates list/get/create/update/delete/dependents handlers for one kind.
macro_rules! crud_routes {
    (
        $module:ident, $field:ident, $kind:expr,
        $id:ty, $new:ty, $patch:ty, $record:ty
    ) => {
        mod $module {
            use super::*;

            async fn list(State(app): State<Arc<App>>) -> Result<Json<Vec<$record>>, ApiError> {
                Ok(Json(app.use_cases.management.$field.list().await?))
            }

            async fn fetch(
                State(app): State<Arc<App>>,
                IdPath(id): IdPath,
            ) -> Result<Json<$record>, ApiError> {
                Ok(Json(app.use_cases.management.$field.get(<$id>::new(id)).await?))
            }

            async fn create(
                State(app): State<Arc<App>>,
                JsonBody(input): JsonBody<$new>,
            ) -> Result<(StatusCode, Json<$record>), ApiError> {
                let created = app.use_cases.management.$field.create(input).await?;
                Ok((StatusCode::CREATED, Json(created)))
            }

            async fn update(
                State(app): State<Arc<App>>,
                IdPath(id): IdPath,
                JsonBody(patch): JsonBody<$patch>,
            ) -> Result<Json<$record>, ApiError> {
                Ok(Json(
                    app.use_cases
                        .management
                        .$field
                        .update(<$id>::new(id), patch)
                        .await?,
                ))
            }

            async fn remove(
                State(app): State<Arc<App>>,
                IdPath(id): IdPath,
            ) -> Result<StatusCode, ApiError> {
                app.use_cases.management.$field.delete(<$id>::new(id)).await?;
                Ok(StatusCode::NO_CONTENT)
            }

            async fn dependents(
                State(app): State<Arc<App>>,
                IdPath(id): IdPath,
            ) -> Result<Json<DependentCounts>, ApiError> {
                Ok(Json(app.use_cases.deletion.dependents($kind, id).await?))
            }

            pub(super) fn routes() -> Router<Arc<App>> {
                Router::new()
                    .route("/", get(list).post(create))
                    .route("/{id}", get(fetch).put(update).delete(remove))
                    .route("/{id}/dependents", get(dependents))
            }
        }
    };
}

crud_routes!(
    manufacturers, manufacturer, EntityKind::Manufacturer,
    armory_domain::ManufacturerId, armory_domain::NewManufacturer,
    armory_domain::ManufacturerPatch, crate::infrastructure::ports::ManufacturerRecord
);
crud_routes!(
    units, unit, EntityKind::MilitaryUnit,
    armory_domain::UnitId, armory_domain::NewMilitaryUnit,
    armory_domain::MilitaryUnitPatch, crate::infrastructure::ports::UnitRecord
);
crud_routes!(
    facilities, facility, EntityKind::StorageFacility,
    armory_domain::FacilityId, armory_domain::NewStorageFacility,
    armory_domain::StorageFacilityPatch, crate::infrastructure::ports::FacilityRecord
);
crud_routes!(
    weapons, weapon, EntityKind::Weapon,
    armory_domain::WeaponId, armory_domain::NewWeapon,
    armory_domain::WeaponPatch, crate::infrastructure::ports::WeaponRecord
);
crud_routes!(
    soldiers, soldier, EntityKind::Soldier,
    armory_domain::SoldierId, armory_domain::NewSoldier,
    armory_domain::SoldierPatch, crate::infrastructure::ports::SoldierRecord
);
crud_routes!(
    assignments, assignment, EntityKind::WeaponAssignment,
    armory_domain::AssignmentId, armory_domain::NewWeaponAssignment,
    armory_domain::WeaponAssignmentPatch, crate::infrastructure::ports::AssignmentRecord
);
crud_routes!(
    maintenance, maintenance, EntityKind::WeaponMaintenance,
    armory_domain::MaintenanceId, armory_domain::NewWeaponMaintenance,
    armory_domain::WeaponMaintenancePatch, crate::infrastructure::ports::MaintenanceRecord
);
crud_routes!(
    ammunition, ammunition, EntityKind::Ammunition,
    armory_domain::AmmunitionId, armory_domain::NewAmmunition,
    armory_domain::AmmunitionPatch, crate::infrastructure::ports::AmmunitionRecord
);

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/assignments/{id}/return", post(return_assignment))
        .route("/api/assignments/{id}/lost", post(mark_lost))
        .route("/api/ammunition/refresh-status", post(refresh_ammunition_status))
        .nest("/api/manufacturers", manufacturers::routes())
        .nest("/api/units", units::routes())
        .nest("/api/facilities", facilities::routes())
        .nest("/api/weapons", weapons::routes())
        .nest("/api/soldiers", soldiers::routes())
        .nest("/api/assignments", assignments::routes())
        .nest("/api/maintenance", maintenance::routes())
        .nest("/api/ammunition", ammunition::routes())
        .route("/api/reports/manufacturers", get(report_manufacturers))
        .route("/api/reports/units", get(report_units))
        .route("/api/reports/facilities", get(report_facilities))
        .route("/api/reports/weapons", get(report_weapons))
        .route("/api/reports/ammunition", get(report_ammunition))
        .route("/api/reports/maintenance", get(report_maintenance))
        .route("/api/reports/assignments", get(report_assignments))
        .route("/api/reports/overview", get(report_overview))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Custody
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CloseRequest {
    date: Option<NaiveDate>,
}

async fn return_assignment(
    State(app): State<Arc<App>>,
    IdPath(id): IdPath,
    OptionalJsonBody(body): OptionalJsonBody<CloseRequest>,
) -> Result<Json<AssignmentRecord>, ApiError> {
    let closed = app
        .use_cases
        .custody
        .return_assignment(AssignmentId::new(id), body.date)
        .await?;
    Ok(Json(closed))
}

async fn mark_lost(
    State(app): State<Arc<App>>,
    IdPath(id): IdPath,
    OptionalJsonBody(body): OptionalJsonBody<CloseRequest>,
) -> Result<Json<AssignmentRecord>, ApiError> {
    let closed = app
        .use_cases
        .custody
        .mark_lost(AssignmentId::new(id), body.date)
        .await?;
    Ok(Json(closed))
}

// =============================================================================
// Status refresh
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefreshRequest {
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct RefreshResponse {
    changed: Vec<AmmunitionId>,
}

async fn refresh_ammunition_status(
    State(app): State<Arc<App>>,
    OptionalJsonBody(body): OptionalJsonBody<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let changed = app.use_cases.refresh_ammunition.execute(body.today).await?;
    Ok(Json(RefreshResponse { changed }))
}

// =============================================================================
// Reports
// =============================================================================

async fn report_manufacturers(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<ManufacturerSummary>>, ApiError> {
    Ok(Json(app.use_cases.reports.manufacturers().await?))
}

async fn report_units(State(app): State<Arc<App>>) -> Result<Json<Vec<UnitSummary>>, ApiError> {
    Ok(Json(app.use_cases.reports.units().await?))
}

async fn report_facilities(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<FacilityOccupancy>>, ApiError> {
    Ok(Json(app.use_cases.reports.facilities().await?))
}

async fn report_weapons(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<WeaponListing>>, ApiError> {
    Ok(Json(app.use_cases.reports.weapons().await?))
}

async fn report_ammunition(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<AmmunitionListing>>, ApiError> {
    Ok(Json(app.use_cases.reports.ammunition().await?))
}

async fn report_maintenance(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<MaintenanceListing>>, ApiError> {
    Ok(Json(app.use_cases.reports.maintenance().await?))
}

async fn report_assignments(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<AssignmentListing>>, ApiError> {
    Ok(Json(app.use_cases.reports.assignments().await?))
}

async fn report_overview(
    State(app): State<Arc<App>>,
) -> Result<Json<InventoryOverview>, ApiError> {
    Ok(Json(app.use_cases.reports.overview().await?))
}
