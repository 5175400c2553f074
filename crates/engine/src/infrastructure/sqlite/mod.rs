//! SQLite entity store.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

mod rows;
mod schema;

mod ammunition_repo;
mod assignment_repo;
mod facility_repo;
mod maintenance_repo;
mod manufacturer_repo;
mod reference_repo;
mod report_repo;
mod soldier_repo;
mod unit_repo;
mod weapon_repo;


pub use ammunition_repo::SqliteAmmunitionRepo;
pub use assignment_repo::SqliteAssignmentRepo;
pub use facility_repo::SqliteFacilityRepo;
pub use maintenance_repo::SqliteMaintenanceRepo;
pub use manufacturer_repo::SqliteManufacturerRepo;
pub use reference_repo::SqliteReferenceRepo;
pub use report_repo::SqliteReportRepo;
pub use soldier_repo::SqliteSoldierRepo;
pub use unit_repo::SqliteUnitRepo;
pub use weapon_repo::SqliteWeaponRepo;

/// All SQLite repositories sharing one pool.
pub struct SqliteRepositories {
    pub manufacturer: Arc<SqliteManufacturerRepo>,
    pub unit: Arc<SqliteUnitRepo>,
    pub facility: Arc<SqliteFacilityRepo>,
    pub weapon: Arc<SqliteWeaponRepo>,
    pub soldier: Arc<SqliteSoldierRepo>,
    /// Serves both the assignment reads and the custody transactions.
    pub assignment: Arc<SqliteAssignmentRepo>,
    pub maintenance: Arc<SqliteMaintenanceRepo>,
    pub ammunition: Arc<SqliteAmmunitionRepo>,
    pub reference: Arc<SqliteReferenceRepo>,
    pub report: Arc<SqliteReportRepo>,
}

impl SqliteRepositories {
    /// Opens (creating if missing) the database at `database_url` and
    /// ensures the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepoError::database("store", "connect", e))?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("store", "connect", e))?;
        Self::from_pool(pool).await
    }

    /// A private in-memory database. It lives as long as the single pooled
    /// connection does.
    pub async fn in_memory() -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepoError::database("store", "connect", e))?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("store", "connect", e))?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        schema::ensure_schema(&pool).await?;
        tracing::debug!("SQLite schema ready");
        Ok(Self {
            manufacturer: Arc::new(SqliteManufacturerRepo::new(pool.clone())),
            unit: Arc::new(SqliteUnitRepo::new(pool.clone())),
            facility: Arc::new(SqliteFacilityRepo::new(pool.clone())),
            weapon: Arc::new(SqliteWeaponRepo::new(pool.clone())),
            soldier: Arc::new(SqliteSoldierRepo::new(pool.clone())),
            assignment: Arc::new(SqliteAssignmentRepo::new(pool.clone())),
            maintenance: Arc::new(SqliteMaintenanceRepo::new(pool.clone())),
            ammunition: Arc::new(SqliteAmmunitionRepo::new(pool.clone())),
            reference: Arc::new(SqliteReferenceRepo::new(pool.clone())),
            report: Arc::new(SqliteReportRepo::new(pool)),
        })
    }
}
