//! Soldier rows.

use async_trait::async_trait;
use armory_domain::{Record, Soldier, SoldierId, UnitId};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::rows::{db_error, RowExt};
use crate::infrastructure::ports::{RepoError, SoldierRecord, SoldierRepo};

const ENTITY: &str = "Soldier";

pub struct SqliteSoldierRepo {
    pool: SqlitePool,
}

impl SqliteSoldierRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn soldier_from_row(row: &SqliteRow) -> Result<SoldierRecord, RepoError> {
    Ok(Record::new(
        SoldierId::new(row.int("id")?),
        Soldier {
            first_name: row.text("first_name")?,
            last_name: row.text("last_name")?,
            rank: row.text("rank")?,
            serial_number: row.text("serial_number")?,
            date_of_birth: row.opt_date("date_of_birth")?,
            join_date: row.date("join_date")?,
            unit_id: UnitId::new(row.int("unit_id")?),
            status: row.parsed("status")?,
            specialization: row.text("specialization")?,
        },
    ))
}

#[async_trait]
impl SoldierRepo for SqliteSoldierRepo {
    async fn get(&self, id: SoldierId) -> Result<Option<SoldierRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM soldiers WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "get"))?;
        row.as_ref().map(soldier_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<SoldierRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM soldiers ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "list"))?;
        rows.iter().map(soldier_from_row).collect()
    }

    async fn find_by_serial(&self, serial_number: &str) -> Result<Option<SoldierRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM soldiers WHERE serial_number = ?")
            .bind(serial_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "find_by_serial"))?;
        row.as_ref().map(soldier_from_row).transpose()
    }

    async fn insert(&self, soldier: &Soldier) -> Result<SoldierId, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO soldiers (
                first_name, last_name, rank, serial_number, date_of_birth,
                join_date, unit_id, status, specialization
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&soldier.first_name)
        .bind(&soldier.last_name)
        .bind(&soldier.rank)
        .bind(&soldier.serial_number)
        .bind(soldier.date_of_birth)
        .bind(soldier.join_date)
        .bind(soldier.unit_id.get())
        .bind(soldier.status.as_str())
        .bind(&soldier.specialization)
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "insert"))?;
        Ok(SoldierId::new(result.last_insert_rowid()))
    }

    async fn update(&self, id: SoldierId, soldier: &Soldier) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE soldiers
            SET first_name = ?, last_name = ?, rank = ?, serial_number = ?, date_of_birth = ?,
                join_date = ?, unit_id = ?, status = ?, specialization = ?
            WHERE id = ?
            "#,
        )
        .bind(&soldier.first_name)
        .bind(&soldier.last_name)
        .bind(&soldier.rank)
        .bind(&soldier.serial_number)
        .bind(soldier.date_of_birth)
        .bind(soldier.join_date)
        .bind(soldier.unit_id.get())
        .bind(soldier.status.as_str())
        .bind(&soldier.specialization)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "update"))?;
        Ok(result.rows_affected() > 0)
    }
}
