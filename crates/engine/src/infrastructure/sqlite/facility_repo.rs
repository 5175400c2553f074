//! Storage facility rows.

use async_trait::async_trait;
use armory_domain::{FacilityId, Record, StorageFacility};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::rows::{db_error, RowExt};
use crate::infrastructure::ports::{FacilityRecord, FacilityRepo, RepoError};

const ENTITY: &str = "StorageFacility";

pub struct SqliteFacilityRepo {
    pool: SqlitePool,
}

impl SqliteFacilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn facility_from_row(row: &SqliteRow) -> Result<FacilityRecord, RepoError> {
    Ok(Record::new(
        FacilityId::new(row.int("id")?),
        StorageFacility {
            name: row.text("name")?,
            location: row.text("location")?,
            capacity: row.small("capacity")?,
            security_level: row.parsed("security_level")?,
            status: row.parsed("status")?,
        },
    ))
}

#[async_trait]
impl FacilityRepo for SqliteFacilityRepo {
    async fn get(&self, id: FacilityId) -> Result<Option<FacilityRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM storage_facilities WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "get"))?;
        row.as_ref().map(facility_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<FacilityRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM storage_facilities ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "list"))?;
        rows.iter().map(facility_from_row).collect()
    }

    async fn insert(&self, facility: &StorageFacility) -> Result<FacilityId, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO storage_facilities (name, location, capacity, security_level, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&facility.name)
        .bind(&facility.location)
        .bind(facility.capacity)
        .bind(facility.security_level.as_str())
        .bind(facility.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "insert"))?;
        Ok(FacilityId::new(result.last_insert_rowid()))
    }

    async fn update(&self, id: FacilityId, facility: &StorageFacility) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE storage_facilities
            SET name = ?, location = ?, capacity = ?, security_level = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&facility.name)
        .bind(&facility.location)
        .bind(facility.capacity)
        .bind(facility.security_level.as_str())
        .bind(facility.status.as_str())
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "update"))?;
        Ok(result.rows_affected() > 0)
    }
}
