//! Point lookups and dependency counts across every table.

use async_trait::async_trait;
use armory_domain::{DependentCount, DependentCounts, EntityKind, FacilityId, FacilityStatus};
use sqlx::{SqliteConnection, SqlitePool};

use super::rows::{db_error, RowExt};
use super::schema::table;
use crate::infrastructure::ports::{DeleteOutcome, ReferenceRepo, RepoError};

pub struct SqliteReferenceRepo {
    pool: SqlitePool,
}

impl SqliteReferenceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn row_exists(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
    operation: &'static str,
) -> Result<bool, RepoError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?", table(kind));
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(db_error(kind.as_str(), operation))?;
    Ok(row.is_some())
}

async fn dependents(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
    operation: &'static str,
) -> Result<DependentCounts, RepoError> {
    let mut counts = Vec::with_capacity(kind.dependents().len());
    for dep in kind.dependents() {
        // Table and column names come from a closed set, never from input.
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = ?", table(dep.kind), dep.field);
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error(kind.as_str(), operation))?;
        counts.push(DependentCount {
            kind: dep.kind,
            field: dep.field,
            count: u64::try_from(count).unwrap_or_default(),
        });
    }
    Ok(DependentCounts::new(counts))
}

#[async_trait]
impl ReferenceRepo for SqliteReferenceRepo {
    async fn exists(&self, kind: EntityKind, id: i64) -> Result<bool, RepoError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error(kind.as_str(), "exists"))?;
        row_exists(&mut *conn, kind, id, "exists").await
    }

    async fn count_dependents(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<DependentCounts, RepoError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error(kind.as_str(), "count_dependents"))?;
        dependents(&mut *conn, kind, id, "count_dependents").await
    }

    async fn delete_unreferenced(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<DeleteOutcome, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error(kind.as_str(), "delete"))?;

        if !row_exists(&mut *tx, kind, id, "delete").await? {
            return Ok(DeleteOutcome::Missing);
        }
        let counts = dependents(&mut *tx, kind, id, "delete").await?;
        if !counts.is_clear() {
            return Ok(DeleteOutcome::Blocked(counts));
        }

        let sql = format!("DELETE FROM {} WHERE id = ?", table(kind));
        sqlx::query(&sql)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error(kind.as_str(), "delete"))?;
        tx.commit()
            .await
            .map_err(db_error(kind.as_str(), "delete"))?;
        tracing::debug!(kind = %kind, id, "Unreferenced row deleted");
        Ok(DeleteOutcome::Deleted)
    }

    async fn facility_status(&self, id: FacilityId) -> Result<Option<FacilityStatus>, RepoError> {
        let row = sqlx::query("SELECT status FROM storage_facilities WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("StorageFacility", "facility_status"))?;
        row.as_ref().map(|row| row.parsed("status")).transpose()
    }
}
