//! Read-only joins and counts for presentation.
//!
//! Counts come from scalar subqueries so an entity with no dependents
//! reports 0 rather than dropping out of the result or yielding NULL.

use async_trait::async_trait;
use armory_domain::EntityKind;
use sqlx::SqlitePool;

use super::ammunition_repo::ammunition_from_row;
use super::assignment_repo::assignment_from_row;
use super::facility_repo::facility_from_row;
use super::maintenance_repo::maintenance_from_row;
use super::manufacturer_repo::manufacturer_from_row;
use super::rows::{db_error, RowExt};
use super::schema::table;
use super::unit_repo::unit_from_row;
use super::weapon_repo::weapon_from_row;
use crate::infrastructure::ports::{
    AmmunitionListing, AssignmentListing, FacilityOccupancy, MaintenanceListing,
    ManufacturerSummary, RepoError, ReportRepo, StatusCount, UnitSummary, WeaponListing,
};

const ENTITY: &str = "Report";

pub struct SqliteReportRepo {
    pool: SqlitePool,
}

impl SqliteReportRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepo for SqliteReportRepo {
    async fn manufacturer_summaries(&self) -> Result<Vec<ManufacturerSummary>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT m.*,
                (SELECT COUNT(*) FROM weapons w WHERE w.manufacturer_id = m.id) AS weapon_count,
                (SELECT COUNT(*) FROM ammunition a WHERE a.manufacturer_id = m.id) AS ammunition_count
            FROM manufacturers m
            ORDER BY m.name, m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(ENTITY, "manufacturer_summaries"))?;

        rows.iter()
            .map(|row| {
                Ok(ManufacturerSummary {
                    manufacturer: manufacturer_from_row(row)?,
                    weapon_count: row.count("weapon_count")?,
                    ammunition_count: row.count("ammunition_count")?,
                })
            })
            .collect()
    }

    async fn unit_summaries(&self) -> Result<Vec<UnitSummary>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT u.*,
                (SELECT COUNT(*) FROM soldiers s WHERE s.unit_id = u.id) AS soldier_count,
                (SELECT COUNT(*)
                    FROM weapon_assignments wa
                    JOIN soldiers s ON s.id = wa.soldier_id
                    WHERE s.unit_id = u.id) AS assignment_count,
                (SELECT COUNT(*)
                    FROM weapon_assignments wa
                    JOIN soldiers s ON s.id = wa.soldier_id
                    WHERE s.unit_id = u.id AND wa.status = 'Active') AS active_assignment_count
            FROM military_units u
            ORDER BY u.name, u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(ENTITY, "unit_summaries"))?;

        rows.iter()
            .map(|row| {
                Ok(UnitSummary {
                    unit: unit_from_row(row)?,
                    soldier_count: row.count("soldier_count")?,
                    assignment_count: row.count("assignment_count")?,
                    active_assignment_count: row.count("active_assignment_count")?,
                })
            })
            .collect()
    }

    async fn facility_occupancy(&self) -> Result<Vec<FacilityOccupancy>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT f.*,
                (SELECT COUNT(*) FROM weapons w WHERE w.facility_id = f.id) AS weapon_count,
                (SELECT COUNT(*) FROM ammunition a WHERE a.facility_id = f.id) AS ammunition_lot_count,
                COALESCE(
                    (SELECT SUM(a.quantity) FROM ammunition a WHERE a.facility_id = f.id),
                    0
                ) AS ammunition_quantity
            FROM storage_facilities f
            ORDER BY f.name, f.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(ENTITY, "facility_occupancy"))?;

        rows.iter()
            .map(|row| {
                Ok(FacilityOccupancy {
                    facility: facility_from_row(row)?,
                    weapon_count: row.count("weapon_count")?,
                    ammunition_lot_count: row.count("ammunition_lot_count")?,
                    ammunition_quantity: row.count("ammunition_quantity")?,
                })
            })
            .collect()
    }

    async fn weapon_listings(&self) -> Result<Vec<WeaponListing>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT w.*,
                m.name AS manufacturer_name,
                f.name AS facility_name,
                u.name AS assigned_unit_name
            FROM weapons w
            JOIN manufacturers m ON m.id = w.manufacturer_id
            LEFT JOIN storage_facilities f ON f.id = w.facility_id
            LEFT JOIN military_units u ON u.id = w.assigned_unit_id
            ORDER BY w.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(ENTITY, "weapon_listings"))?;

        rows.iter()
            .map(|row| {
                Ok(WeaponListing {
                    weapon: weapon_from_row(row)?,
                    manufacturer_name: row.text("manufacturer_name")?,
                    facility_name: row.opt_text("facility_name")?,
                    assigned_unit_name: row.opt_text("assigned_unit_name")?,
                })
            })
            .collect()
    }

    async fn ammunition_listings(&self) -> Result<Vec<AmmunitionListing>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT a.*,
                m.name AS manufacturer_name,
                f.name AS facility_name
            FROM ammunition a
            JOIN manufacturers m ON m.id = a.manufacturer_id
            JOIN storage_facilities f ON f.id = a.facility_id
            ORDER BY a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(ENTITY, "ammunition_listings"))?;

        rows.iter()
            .map(|row| {
                Ok(AmmunitionListing {
                    ammunition: ammunition_from_row(row)?,
                    manufacturer_name: row.text("manufacturer_name")?,
                    facility_name: row.text("facility_name")?,
                })
            })
            .collect()
    }

    async fn maintenance_listings(&self) -> Result<Vec<MaintenanceListing>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT wm.*,
                w.name AS weapon_name,
                w.serial_number AS weapon_serial_number
            FROM weapon_maintenance wm
            JOIN weapons w ON w.id = wm.weapon_id
            ORDER BY wm.start_date DESC, wm.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(ENTITY, "maintenance_listings"))?;

        rows.iter()
            .map(|row| {
                Ok(MaintenanceListing {
                    maintenance: maintenance_from_row(row)?,
                    weapon_name: row.text("weapon_name")?,
                    weapon_serial_number: row.text("weapon_serial_number")?,
                })
            })
            .collect()
    }

    async fn assignment_listings(&self) -> Result<Vec<AssignmentListing>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT wa.*,
                w.name AS weapon_name,
                w.serial_number AS weapon_serial_number,
                s.first_name || ' ' || s.last_name AS soldier_name,
                u.name AS unit_name
            FROM weapon_assignments wa
            JOIN weapons w ON w.id = wa.weapon_id
            JOIN soldiers s ON s.id = wa.soldier_id
            JOIN military_units u ON u.id = wa.unit_id
            ORDER BY wa.assignment_date DESC, wa.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(ENTITY, "assignment_listings"))?;

        rows.iter()
            .map(|row| {
                Ok(AssignmentListing {
                    assignment: assignment_from_row(row)?,
                    weapon_name: row.text("weapon_name")?,
                    weapon_serial_number: row.text("weapon_serial_number")?,
                    soldier_name: row.text("soldier_name")?,
                    unit_name: row.text("unit_name")?,
                })
            })
            .collect()
    }

    async fn status_counts(&self, kind: EntityKind) -> Result<Vec<StatusCount>, RepoError> {
        let sql = format!(
            "SELECT status, COUNT(*) AS count FROM {} GROUP BY status ORDER BY status",
            table(kind)
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "status_counts"))?;

        rows.iter()
            .map(|row| {
                Ok(StatusCount {
                    status: row.text("status")?,
                    count: row.count("count")?,
                })
            })
            .collect()
    }
}
