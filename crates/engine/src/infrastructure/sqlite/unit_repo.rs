//! Military unit rows.

use async_trait::async_trait;
use armory_domain::{MilitaryUnit, Record, UnitId};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::rows::{db_error, RowExt};
use crate::infrastructure::ports::{RepoError, UnitRecord, UnitRepo};

const ENTITY: &str = "MilitaryUnit";

pub struct SqliteUnitRepo {
    pool: SqlitePool,
}

impl SqliteUnitRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn unit_from_row(row: &SqliteRow) -> Result<UnitRecord, RepoError> {
    Ok(Record::new(
        UnitId::new(row.int("id")?),
        MilitaryUnit {
            name: row.text("name")?,
            unit_type: row.text("unit_type")?,
            location: row.text("location")?,
            commanding_officer: row.text("commanding_officer")?,
            status: row.parsed("status")?,
        },
    ))
}

#[async_trait]
impl UnitRepo for SqliteUnitRepo {
    async fn get(&self, id: UnitId) -> Result<Option<UnitRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM military_units WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "get"))?;
        row.as_ref().map(unit_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<UnitRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM military_units ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "list"))?;
        rows.iter().map(unit_from_row).collect()
    }

    async fn insert(&self, unit: &MilitaryUnit) -> Result<UnitId, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO military_units (name, unit_type, location, commanding_officer, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&unit.name)
        .bind(&unit.unit_type)
        .bind(&unit.location)
        .bind(&unit.commanding_officer)
        .bind(unit.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "insert"))?;
        Ok(UnitId::new(result.last_insert_rowid()))
    }

    async fn update(&self, id: UnitId, unit: &MilitaryUnit) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE military_units
            SET name = ?, unit_type = ?, location = ?, commanding_officer = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&unit.name)
        .bind(&unit.unit_type)
        .bind(&unit.location)
        .bind(&unit.commanding_officer)
        .bind(unit.status.as_str())
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "update"))?;
        Ok(result.rows_affected() > 0)
    }
}
