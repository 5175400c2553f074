//! Weapon rows.
//!
//! `assigned_unit_id` is read here but only written by the custody
//! transactions in `assignment_repo`.

use async_trait::async_trait;
use armory_domain::{FacilityId, ManufacturerId, Record, UnitId, Weapon, WeaponId};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::rows::{db_error, RowExt};
use crate::infrastructure::ports::{RepoError, WeaponRecord, WeaponRepo};

const ENTITY: &str = "Weapon";

pub struct SqliteWeaponRepo {
    pool: SqlitePool,
}

impl SqliteWeaponRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn weapon_from_row(row: &SqliteRow) -> Result<WeaponRecord, RepoError> {
    Ok(Record::new(
        WeaponId::new(row.int("id")?),
        Weapon {
            name: row.text("name")?,
            weapon_type: row.text("weapon_type")?,
            model: row.text("model")?,
            serial_number: row.text("serial_number")?,
            manufacturer_id: ManufacturerId::new(row.int("manufacturer_id")?),
            caliber: row.text("caliber")?,
            acquisition_date: row.opt_date("acquisition_date")?,
            status: row.parsed("status")?,
            assigned_unit_id: row.opt_int("assigned_unit_id")?.map(UnitId::new),
            facility_id: row.opt_int("facility_id")?.map(FacilityId::new),
            last_inspection_date: row.opt_date("last_inspection_date")?,
        },
    ))
}

#[async_trait]
impl WeaponRepo for SqliteWeaponRepo {
    async fn get(&self, id: WeaponId) -> Result<Option<WeaponRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM weapons WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "get"))?;
        row.as_ref().map(weapon_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<WeaponRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM weapons ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(ENTITY, "list"))?;
        rows.iter().map(weapon_from_row).collect()
    }

    async fn find_by_serial(&self, serial_number: &str) -> Result<Option<WeaponRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM weapons WHERE serial_number = ?")
            .bind(serial_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(ENTITY, "find_by_serial"))?;
        row.as_ref().map(weapon_from_row).transpose()
    }

    async fn insert(&self, weapon: &Weapon) -> Result<WeaponId, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO weapons (
                name, weapon_type, model, serial_number, manufacturer_id, caliber,
                acquisition_date, status, assigned_unit_id, facility_id, last_inspection_date
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
            "#,
        )
        .bind(&weapon.name)
        .bind(&weapon.weapon_type)
        .bind(&weapon.model)
        .bind(&weapon.serial_number)
        .bind(weapon.manufacturer_id.get())
        .bind(&weapon.caliber)
        .bind(weapon.acquisition_date)
        .bind(weapon.status.as_str())
        .bind(weapon.facility_id.map(FacilityId::get))
        .bind(weapon.last_inspection_date)
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "insert"))?;
        Ok(WeaponId::new(result.last_insert_rowid()))
    }

    async fn update(&self, id: WeaponId, weapon: &Weapon) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE weapons
            SET name = ?, weapon_type = ?, model = ?, serial_number = ?, manufacturer_id = ?,
                caliber = ?, acquisition_date = ?, status = ?, facility_id = ?,
                last_inspection_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&weapon.name)
        .bind(&weapon.weapon_type)
        .bind(&weapon.model)
        .bind(&weapon.serial_number)
        .bind(weapon.manufacturer_id.get())
        .bind(&weapon.caliber)
        .bind(weapon.acquisition_date)
        .bind(weapon.status.as_str())
        .bind(weapon.facility_id.map(FacilityId::get))
        .bind(weapon.last_inspection_date)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(db_error(ENTITY, "update"))?;
        Ok(result.rows_affected() > 0)
    }
}
