//! Ammunition lot rows.

use async_trait::async_trait;
use armory_domain::{
    Ammunition, AmmunitionId, AmmunitionStatus, FacilityId, ManufacturerId, Record,
};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::rows::{db_error, RowExt};
use crate::infrastructure::ports::{AmmunitionRecord, AmmunitionRepo, RepoError};

const ENTITY: &str = "Ammunition";

pub struct SqliteAmmunitionRepo {
    pool: SqlitePool,
}

impl SqliteAmmunitionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn ammunition_from_row(row: &SqliteRow) -> Result<AmmunitionRecord, RepoError> {
    Ok(Record::new(
        AmmunitionId::new(row.int("id")?),
        Ammunition {
            name: row.text("name")?,
            ammo_type: row.text("ammo_type")?,
            caliber: row.text("caliber")?,
            quantity: row.small("quantity")?,
            manufacturer_id: ManufacturerId::new(row.int("manufacturer_id")?),
            batch_number: row.text("batch_number")?,
            production_date: row.opt_date("production_date")?,
            expiration_date: row.opt_date("expiration_date")?,
            facility_id: FacilityId::new(row.int("facility_id")?),
            status: row.parsed("status")?,
        },
    ))
}

#[async_trait]
impl AmmunitionRepo for SqliteAmmunitionRepo {
    async fn get(&self, id: AmmunitionId) -> Result<Option<AmmunitionRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM ammunition WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "get"))?;
        row.as_ref().map(ammunition_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<AmmunitionRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM ammunition ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "list"))?;
        rows.iter().map(ammunition_from_row).collect()
    }

    async fn insert(&self, lot: &Ammunition) -> Result<AmmunitionId, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO ammunition (
                name, ammo_type, caliber, quantity, manufacturer_id, batch_number,
                production_date, expiration_date, facility_id, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&lot.name)
        .bind(&lot.ammo_type)
        .bind(&lot.caliber)
        .bind(lot.quantity)
        .bind(lot.manufacturer_id.get())
        .bind(&lot.batch_number)
        .bind(lot.production_date)
        .bind(lot.expiration_date)
        .bind(lot.facility_id.get())
        .bind(lot.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "insert"))?;
        Ok(AmmunitionId::new(result.last_insert_rowid()))
    }

    async fn update(&self, id: AmmunitionId, lot: &Ammunition) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE ammunition
            SET name = ?, ammo_type = ?, caliber = ?, quantity = ?, manufacturer_id = ?,
                batch_number = ?, production_date = ?, expiration_date = ?, facility_id = ?,
                status = ?
            WHERE id = ?
            "#,
        )
        .bind(&lot.name)
        .bind(&lot.ammo_type)
        .bind(&lot.caliber)
        .bind(lot.quantity)
        .bind(lot.manufacturer_id.get())
        .bind(&lot.batch_number)
        .bind(lot.production_date)
        .bind(lot.expiration_date)
        .bind(lot.facility_id.get())
        .bind(lot.status.as_str())
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "update"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn refresh_status(
        &self,
        id: AmmunitionId,
        from: AmmunitionStatus,
        to: AmmunitionStatus,
        today: NaiveDate,
    ) -> Result<bool, RepoError> {
        let query = match to {
            AmmunitionStatus::Depleted => sqlx::query(
                "UPDATE ammunition SET status = ? WHERE id = ? AND status = ? AND quantity = 0",
            )
            .bind(to.as_str())
            .bind(id.get())
            .bind(from.as_str()),
            AmmunitionStatus::Expired => sqlx::query(
                r#"
                UPDATE ammunition SET status = ?
                WHERE id = ? AND status = ?
                  AND expiration_date IS NOT NULL AND expiration_date < ?
                "#,
            )
            .bind(to.as_str())
            .bind(id.get())
            .bind(from.as_str())
            .bind(today),
            AmmunitionStatus::Available | AmmunitionStatus::Reserved => return Ok(false),
        };
        let result = query
            .execute(&self.pool)
            .await
            .map_err(db_error(ENTITY, "refresh_status"))?;
        Ok(result.rows_affected() > 0)
    }
}
