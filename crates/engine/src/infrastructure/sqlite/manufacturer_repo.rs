//! Manufacturer rows.

use async_trait::async_trait;
use armory_domain::{Manufacturer, ManufacturerId, Record};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::rows::{db_error, RowExt};
use crate::infrastructure::ports::{ManufacturerRecord, ManufacturerRepo, RepoError};

const ENTITY: &str = "Manufacturer";

pub struct SqliteManufacturerRepo {
    pool: SqlitePool,
}

impl SqliteManufacturerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn manufacturer_from_row(row: &SqliteRow) -> Result<ManufacturerRecord, RepoError> {
    Ok(Record::new(
        ManufacturerId::new(row.int("id")?),
        Manufacturer {
            name: row.text("name")?,
            country: row.text("country")?,
            contact_info: row.text("contact_info")?,
            status: row.parsed("status")?,
        },
    ))
}

#[async_trait]
impl ManufacturerRepo for SqliteManufacturerRepo {
    async fn get(&self, id: ManufacturerId) -> Result<Option<ManufacturerRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM manufacturers WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "get"))?;
        row.as_ref().map(manufacturer_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<ManufacturerRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM manufacturers ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "list"))?;
        rows.iter().map(manufacturer_from_row).collect()
    }

    async fn insert(&self, manufacturer: &Manufacturer) -> Result<ManufacturerId, RepoError> {
        let result = sqlx::query(
            "INSERT INTO manufacturers (name, country, contact_info, status) VALUES (?, ?, ?, ?)",
        )
        .bind(&manufacturer.name)
        .bind(&manufacturer.country)
        .bind(&manufacturer.contact_info)
        .bind(manufacturer.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "insert"))?;
        Ok(ManufacturerId::new(result.last_insert_rowid()))
    }

    async fn update(
        &self,
        id: ManufacturerId,
        manufacturer: &Manufacturer,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query(
            "UPDATE manufacturers SET name = ?, country = ?, contact_info = ?, status = ? WHERE id = ?",
        )
        .bind(&manufacturer.name)
        .bind(&manufacturer.country)
        .bind(&manufacturer.contact_info)
        .bind(manufacturer.status.as_str())
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "update"))?;
        Ok(result.rows_affected() > 0)
    }
}
