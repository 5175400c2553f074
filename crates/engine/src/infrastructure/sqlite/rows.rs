//! Row decoding and error mapping shared by the SQLite repositories.

use std::str::FromStr;

use armory_domain::DomainError;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::infrastructure::ports::RepoError;

/// Maps a driver error to a [`RepoError`].
///
/// Foreign-key violations become dangling references; unique and check
/// violations become constraint violations. Callers can tell a rejected
/// write from a broken store.
pub(super) fn db_error(
    entity_type: &'static str,
    operation: &'static str,
) -> impl FnOnce(sqlx::Error) -> RepoError {
    move |err| match err.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => {
            RepoError::dangling_reference(entity_type, db.message())
        }
        Some(db) if db.is_unique_violation() || db.is_check_violation() => {
            RepoError::constraint(entity_type, db.message())
        }
        _ => RepoError::database(entity_type, operation, err),
    }
}

/// Typed column access that reports decode failures instead of panicking.
pub(super) trait RowExt {
    fn text(&self, column: &str) -> Result<String, RepoError>;
    fn int(&self, column: &str) -> Result<i64, RepoError>;
    fn opt_int(&self, column: &str) -> Result<Option<i64>, RepoError>;
    fn opt_text(&self, column: &str) -> Result<Option<String>, RepoError>;
    fn date(&self, column: &str) -> Result<NaiveDate, RepoError>;
    fn opt_date(&self, column: &str) -> Result<Option<NaiveDate>, RepoError>;

    /// Non-negative integer column (counts, quantities, capacities).
    fn count(&self, column: &str) -> Result<u64, RepoError> {
        let raw = self.int(column)?;
        u64::try_from(raw)
            .map_err(|_| RepoError::serialization(format!("column {}: negative value {}", column, raw)))
    }

    fn small(&self, column: &str) -> Result<u32, RepoError> {
        let raw = self.int(column)?;
        u32::try_from(raw)
            .map_err(|_| RepoError::serialization(format!("column {}: out of range {}", column, raw)))
    }

    /// Text column holding a named value such as a status.
    fn parsed<T>(&self, column: &str) -> Result<T, RepoError>
    where
        T: FromStr<Err = DomainError>,
    {
        self.text(column)?
            .parse()
            .map_err(|e: DomainError| RepoError::serialization(format!("column {}: {}", column, e)))
    }
}

fn decode_error(column: &str, err: sqlx::Error) -> RepoError {
    RepoError::serialization(format!("column {}: {}", column, err))
}

impl RowExt for SqliteRow {
    fn text(&self, column: &str) -> Result<String, RepoError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn int(&self, column: &str) -> Result<i64, RepoError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn opt_int(&self, column: &str) -> Result<Option<i64>, RepoError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn opt_text(&self, column: &str) -> Result<Option<String>, RepoError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn date(&self, column: &str) -> Result<NaiveDate, RepoError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn opt_date(&self, column: &str) -> Result<Option<NaiveDate>, RepoError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }
}
