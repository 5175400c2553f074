//! Weapon maintenance rows. Cost is stored as integer cents.

use async_trait::async_trait;
use armory_domain::{Cost, MaintenanceId, Record, WeaponId, WeaponMaintenance};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::rows::{db_error, RowExt};
use crate::infrastructure::ports::{MaintenanceRecord, MaintenanceRepo, RepoError};

const ENTITY: &str = "WeaponMaintenance";

pub struct SqliteMaintenanceRepo {
    pool: SqlitePool,
}

impl SqliteMaintenanceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn maintenance_from_row(row: &SqliteRow) -> Result<MaintenanceRecord, RepoError> {
    let cost = Cost::from_cents(row.int("cost_cents")?)
        .map_err(|e| RepoError::serialization(format!("column cost_cents: {}", e)))?;
    Ok(Record::new(
        MaintenanceId::new(row.int("id")?),
        WeaponMaintenance {
            weapon_id: WeaponId::new(row.int("weapon_id")?),
            maintenance_type: row.parsed("maintenance_type")?,
            start_date: row.date("start_date")?,
            end_date: row.opt_date("end_date")?,
            technician: row.text("technician")?,
            status: row.parsed("status")?,
            cost,
            notes: row.text("notes")?,
        },
    ))
}

#[async_trait]
impl MaintenanceRepo for SqliteMaintenanceRepo {
    async fn get(&self, id: MaintenanceId) -> Result<Option<MaintenanceRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM weapon_maintenance WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "get"))?;
        row.as_ref().map(maintenance_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<MaintenanceRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM weapon_maintenance ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "list"))?;
        rows.iter().map(maintenance_from_row).collect()
    }

    async fn insert(&self, record: &WeaponMaintenance) -> Result<MaintenanceId, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO weapon_maintenance (
                weapon_id, maintenance_type, start_date, end_date, technician, status,
                cost_cents, notes
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.weapon_id.get())
        .bind(record.maintenance_type.as_str())
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(&record.technician)
        .bind(record.status.as_str())
        .bind(record.cost.cents())
        .bind(&record.notes)
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "insert"))?;
        Ok(MaintenanceId::new(result.last_insert_rowid()))
    }

    async fn update(&self, id: MaintenanceId, record: &WeaponMaintenance) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE weapon_maintenance
            SET weapon_id = ?, maintenance_type = ?, start_date = ?, end_date = ?,
                technician = ?, status = ?, cost_cents = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(record.weapon_id.get())
        .bind(record.maintenance_type.as_str())
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(&record.technician)
        .bind(record.status.as_str())
        .bind(record.cost.cents())
        .bind(&record.notes)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "update"))?;
        Ok(result.rows_affected() > 0)
    }
}
