//! Table layout. Created idempotently at startup.
//!
//! Dates are `YYYY-MM-DD` text, cost is integer cents, statuses are stored
//! by name.

use armory_domain::EntityKind;
use sqlx::SqlitePool;

use super::rows::db_error;
use crate::infrastructure::ports::RepoError;

/// Table holding rows of `kind`.
pub(super) fn table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Manufacturer => "manufacturers",
        EntityKind::MilitaryUnit => "military_units",
        EntityKind::StorageFacility => "storage_facilities",
        EntityKind::Weapon => "weapons",
        EntityKind::Soldier => "soldiers",
        EntityKind::WeaponAssignment => "weapon_assignments",
        EntityKind::WeaponMaintenance => "weapon_maintenance",
        EntityKind::Ammunition => "ammunition",
    }
}

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS manufacturers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        country TEXT NOT NULL DEFAULT '',
        contact_info TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS military_units (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        unit_type TEXT NOT NULL DEFAULT '',
        location TEXT NOT NULL DEFAULT '',
        commanding_officer TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS storage_facilities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        location TEXT NOT NULL DEFAULT '',
        capacity INTEGER NOT NULL DEFAULT 0 CHECK (capacity >= 0),
        security_level TEXT NOT NULL,
        status TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS weapons (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        weapon_type TEXT NOT NULL DEFAULT '',
        model TEXT NOT NULL DEFAULT '',
        serial_number TEXT NOT NULL UNIQUE,
        manufacturer_id INTEGER NOT NULL REFERENCES manufacturers(id),
        caliber TEXT NOT NULL DEFAULT '',
        acquisition_date TEXT,
        status TEXT NOT NULL,
        assigned_unit_id INTEGER REFERENCES military_units(id),
        facility_id INTEGER REFERENCES storage_facilities(id),
        last_inspection_date TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS soldiers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        rank TEXT NOT NULL DEFAULT '',
        serial_number TEXT NOT NULL UNIQUE,
        date_of_birth TEXT,
        join_date TEXT NOT NULL,
        unit_id INTEGER NOT NULL REFERENCES military_units(id),
        status TEXT NOT NULL,
        specialization TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS weapon_assignments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        weapon_id INTEGER NOT NULL REFERENCES weapons(id),
        soldier_id INTEGER NOT NULL REFERENCES soldiers(id),
        unit_id INTEGER NOT NULL REFERENCES military_units(id),
        assignment_date TEXT NOT NULL,
        return_date TEXT,
        status TEXT NOT NULL,
        notes TEXT NOT NULL DEFAULT '',
        CHECK ((status = 'Active') = (return_date IS NULL))
    )
    "#,
    // At most one Active custody row per weapon.
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_weapon_assignments_one_active
        ON weapon_assignments(weapon_id) WHERE status = 'Active'
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS weapon_maintenance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        weapon_id INTEGER NOT NULL REFERENCES weapons(id),
        maintenance_type TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT,
        technician TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL,
        cost_cents INTEGER NOT NULL DEFAULT 0 CHECK (cost_cents >= 0),
        notes TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ammunition (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        ammo_type TEXT NOT NULL DEFAULT '',
        caliber TEXT NOT NULL DEFAULT '',
        quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
        manufacturer_id INTEGER NOT NULL REFERENCES manufacturers(id),
        batch_number TEXT NOT NULL DEFAULT '',
        production_date TEXT,
        expiration_date TEXT,
        facility_id INTEGER NOT NULL REFERENCES storage_facilities(id),
        status TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_weapons_manufacturer ON weapons(manufacturer_id)",
    "CREATE INDEX IF NOT EXISTS idx_weapons_facility ON weapons(facility_id)",
    "CREATE INDEX IF NOT EXISTS idx_weapons_assigned_unit ON weapons(assigned_unit_id)",
    "CREATE INDEX IF NOT EXISTS idx_soldiers_unit ON soldiers(unit_id)",
    "CREATE INDEX IF NOT EXISTS idx_weapon_assignments_soldier ON weapon_assignments(soldier_id)",
    "CREATE INDEX IF NOT EXISTS idx_weapon_assignments_unit ON weapon_assignments(unit_id)",
    "CREATE INDEX IF NOT EXISTS idx_weapon_maintenance_weapon ON weapon_maintenance(weapon_id)",
    "CREATE INDEX IF NOT EXISTS idx_ammunition_manufacturer ON ammunition(manufacturer_id)",
    "CREATE INDEX IF NOT EXISTS idx_ammunition_facility ON ammunition(facility_id)",
];

pub(super) async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(db_error("schema", "create"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_table_with_a_create_statement() {
        for kind in EntityKind::ALL {
            let needle = format!("CREATE TABLE IF NOT EXISTS {} (", table(*kind));
            assert!(
                STATEMENTS.iter().any(|s| s.contains(&needle)),
                "no table for {}",
                kind
            );
        }
    }
}
