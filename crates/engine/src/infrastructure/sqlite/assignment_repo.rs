//! Weapon assignment rows and the custody transactions.
//!
//! Every write that changes who holds a weapon runs here, inside one
//! transaction that also updates `weapons.assigned_unit_id`. The partial
//! unique index on Active rows backs up the caller's per-weapon lock.

use async_trait::async_trait;
use armory_domain::{
    AssignmentId, AssignmentStatus, Record, SoldierId, UnitId, WeaponAssignment, WeaponId,
    WeaponStatus,
};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::rows::{db_error, RowExt};
use crate::infrastructure::ports::{AssignmentRecord, AssignmentRepo, CustodyRepo, RepoError};

const ENTITY: &str = "WeaponAssignment";

pub struct SqliteAssignmentRepo {
    pool: SqlitePool,
}

impl SqliteAssignmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn assignment_from_row(row: &SqliteRow) -> Result<AssignmentRecord, RepoError> {
    Ok(Record::new(
        AssignmentId::new(row.int("id")?),
        WeaponAssignment {
            weapon_id: WeaponId::new(row.int("weapon_id")?),
            soldier_id: SoldierId::new(row.int("soldier_id")?),
            unit_id: UnitId::new(row.int("unit_id")?),
            assignment_date: row.date("assignment_date")?,
            return_date: row.opt_date("return_date")?,
            status: row.parsed("status")?,
            notes: row.text("notes")?,
        },
    ))
}

#[async_trait]
impl AssignmentRepo for SqliteAssignmentRepo {
    async fn get(&self, id: AssignmentId) -> Result<Option<AssignmentRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM weapon_assignments WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "get"))?;
        row.as_ref().map(assignment_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<AssignmentRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM weapon_assignments ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "list"))?;
        rows.iter().map(assignment_from_row).collect()
    }

    async fn find_active_for_weapon(
        &self,
        weapon_id: WeaponId,
    ) -> Result<Option<AssignmentRecord>, RepoError> {
        let row = sqlx::query(
            "SELECT * FROM weapon_assignments WHERE weapon_id = ? AND status = ?",
        )
        .bind(weapon_id.get())
        .bind(AssignmentStatus::Active.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error(ENTITY, "find_active_for_weapon"))?;
        row.as_ref().map(assignment_from_row).transpose()
    }

    async fn update_notes(&self, id: AssignmentId, notes: &str) -> Result<bool, RepoError> {
        let result = sqlx::query("UPDATE weapon_assignments SET notes = ? WHERE id = ?")
            .bind(notes)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(db_error(ENTITY, "update_notes"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CustodyRepo for SqliteAssignmentRepo {
    async fn open(&self, assignment: &WeaponAssignment) -> Result<AssignmentId, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error(ENTITY, "open"))?;

        let result = sqlx::query(
            r#"
            INSERT INTO weapon_assignments (
                weapon_id, soldier_id, unit_id, assignment_date, return_date, status, notes
            )
            VALUES (?, ?, ?, ?, NULL, ?, ?)
            "#,
        )
        .bind(assignment.weapon_id.get())
        .bind(assignment.soldier_id.get())
        .bind(assignment.unit_id.get())
        .bind(assignment.assignment_date)
        .bind(AssignmentStatus::Active.as_str())
        .bind(&assignment.notes)
        .execute(&mut *tx)
        .await
        .map_err(db_error(ENTITY, "open"))?;
        let id = AssignmentId::new(result.last_insert_rowid());

        let weapon = sqlx::query("UPDATE weapons SET assigned_unit_id = ? WHERE id = ?")
            .bind(assignment.unit_id.get())
            .bind(assignment.weapon_id.get())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Weapon", "open"))?;
        if weapon.rows_affected() == 0 {
            // Dropping the transaction rolls the insert back.
            return Err(RepoError::not_found("Weapon", assignment.weapon_id));
        }

        tx.commit().await.map_err(db_error(ENTITY, "open"))?;
        tracing::debug!(assignment_id = %id, weapon_id = %assignment.weapon_id, "Custody opened");
        Ok(id)
    }

    async fn close(
        &self,
        id: AssignmentId,
        closed: &WeaponAssignment,
        weapon_status: Option<WeaponStatus>,
    ) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error(ENTITY, "close"))?;

        let result = sqlx::query(
            r#"
            UPDATE weapon_assignments
            SET status = ?, return_date = ?, notes = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(closed.status.as_str())
        .bind(closed.return_date)
        .bind(&closed.notes)
        .bind(id.get())
        .bind(AssignmentStatus::Active.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_error(ENTITY, "close"))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::constraint(
                ENTITY,
                format!("assignment {} is no longer Active", id),
            ));
        }

        sqlx::query(
            r#"
            UPDATE weapons
            SET assigned_unit_id = NULL, status = COALESCE(?, status)
            WHERE id = ?
            "#,
        )
        .bind(weapon_status.map(WeaponStatus::as_str))
        .bind(closed.weapon_id.get())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Weapon", "close"))?;

        tx.commit().await.map_err(db_error(ENTITY, "close"))?;
        tracing::debug!(assignment_id = %id, weapon_id = %closed.weapon_id, "Custody closed");
        Ok(())
    }

    async fn remove(&self, id: AssignmentId) -> Result<bool, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error(ENTITY, "remove"))?;

        let row = sqlx::query("SELECT * FROM weapon_assignments WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error(ENTITY, "remove"))?;
        let Some(row) = row else {
            return Ok(false);
        };
        let existing = assignment_from_row(&row)?;

        sqlx::query("DELETE FROM weapon_assignments WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(db_error(ENTITY, "remove"))?;

        if existing.value.is_active() {
            sqlx::query("UPDATE weapons SET assigned_unit_id = NULL WHERE id = ?")
                .bind(existing.value.weapon_id.get())
                .execute(&mut *tx)
                .await
                .map_err(db_error("Weapon", "remove"))?;
        }

        tx.commit().await.map_err(db_error(ENTITY, "remove"))?;
        Ok(true)
    }
}
