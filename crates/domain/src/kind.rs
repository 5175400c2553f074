//! Entity kinds and the reference graph between them.

use serde::Serialize;

named_enum! {
    /// Every table the custody core knows about.
    pub enum EntityKind ("entity kind") {
        Manufacturer => "Manufacturer",
        MilitaryUnit => "MilitaryUnit",
        StorageFacility => "StorageFacility",
        Weapon => "Weapon",
        Soldier => "Soldier",
        WeaponAssignment => "WeaponAssignment",
        WeaponMaintenance => "WeaponMaintenance",
        Ammunition => "Ammunition",
    }
}

/// A foreign-key field on `kind` that points at another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub kind: EntityKind,
    pub field: &'static str,
}

const MANUFACTURER_DEPENDENTS: &[Dependency] = &[
    Dependency {
        kind: EntityKind::Weapon,
        field: "manufacturer_id",
    },
    Dependency {
        kind: EntityKind::Ammunition,
        field: "manufacturer_id",
    },
];

const UNIT_DEPENDENTS: &[Dependency] = &[
    Dependency {
        kind: EntityKind::Soldier,
        field: "unit_id",
    },
    Dependency {
        kind: EntityKind::WeaponAssignment,
        field: "unit_id",
    },
    Dependency {
        kind: EntityKind::Weapon,
        field: "assigned_unit_id",
    },
];

const FACILITY_DEPENDENTS: &[Dependency] = &[
    Dependency {
        kind: EntityKind::Weapon,
        field: "facility_id",
    },
    Dependency {
        kind: EntityKind::Ammunition,
        field: "facility_id",
    },
];

const WEAPON_DEPENDENTS: &[Dependency] = &[
    Dependency {
        kind: EntityKind::WeaponAssignment,
        field: "weapon_id",
    },
    Dependency {
        kind: EntityKind::WeaponMaintenance,
        field: "weapon_id",
    },
];

const SOLDIER_DEPENDENTS: &[Dependency] = &[Dependency {
    kind: EntityKind::WeaponAssignment,
    field: "soldier_id",
}];

impl EntityKind {
    /// Rows that reference this kind and therefore block its deletion.
    pub fn dependents(self) -> &'static [Dependency] {
        match self {
            Self::Manufacturer => MANUFACTURER_DEPENDENTS,
            Self::MilitaryUnit => UNIT_DEPENDENTS,
            Self::StorageFacility => FACILITY_DEPENDENTS,
            Self::Weapon => WEAPON_DEPENDENTS,
            Self::Soldier => SOLDIER_DEPENDENTS,
            Self::WeaponAssignment | Self::WeaponMaintenance | Self::Ammunition => &[],
        }
    }
}

/// One foreign-key value a row carries, checked by the reference validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub target: EntityKind,
    pub id: Option<i64>,
}

impl Reference {
    pub fn required(field: &'static str, target: EntityKind, id: impl Into<i64>) -> Self {
        Self {
            field,
            target,
            id: Some(id.into()),
        }
    }

    pub fn optional<I: Into<i64>>(field: &'static str, target: EntityKind, id: Option<I>) -> Self {
        Self {
            field,
            target,
            id: id.map(Into::into),
        }
    }
}

/// Count of rows of one dependent kind referencing a given row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DependentCount {
    pub kind: EntityKind,
    pub field: &'static str,
    pub count: u64,
}

/// All dependent counts for one row, zeros included.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DependentCounts(Vec<DependentCount>);

impl DependentCounts {
    pub fn new(counts: Vec<DependentCount>) -> Self {
        Self(counts)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|c| c.count).sum()
    }

    pub fn is_clear(&self) -> bool {
        self.total() == 0
    }

    /// Count for a dependent kind, summed across its fields.
    pub fn count_of(&self, kind: EntityKind) -> u64 {
        self.0
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.count)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependentCount> {
        self.0.iter()
    }
}

impl std::fmt::Display for DependentCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|c| format!("{}.{}={}", c.kind, c.field, c.count))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_dependents_are_weapons_and_ammunition() {
        let deps = EntityKind::StorageFacility.dependents();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].kind, EntityKind::Weapon);
        assert_eq!(deps[1].kind, EntityKind::Ammunition);
    }

    #[test]
    fn every_parent_kind_lists_its_dependents() {
        assert_eq!(EntityKind::Manufacturer.dependents().len(), 2);
        assert_eq!(EntityKind::MilitaryUnit.dependents().len(), 3);
        assert_eq!(EntityKind::Weapon.dependents().len(), 2);
        assert_eq!(
            EntityKind::Soldier.dependents(),
            &[Dependency {
                kind: EntityKind::WeaponAssignment,
                field: "soldier_id",
            }]
        );
    }

    #[test]
    fn leaf_kinds_have_no_dependents() {
        assert!(EntityKind::Ammunition.dependents().is_empty());
        assert!(EntityKind::WeaponMaintenance.dependents().is_empty());
        assert!(EntityKind::WeaponAssignment.dependents().is_empty());
    }

    #[test]
    fn dependent_counts_totals_and_display() {
        let counts = DependentCounts::new(vec![
            DependentCount {
                kind: EntityKind::Weapon,
                field: "facility_id",
                count: 2,
            },
            DependentCount {
                kind: EntityKind::Ammunition,
                field: "facility_id",
                count: 0,
            },
        ]);
        assert_eq!(counts.total(), 2);
        assert!(!counts.is_clear());
        assert_eq!(counts.count_of(EntityKind::Ammunition), 0);
        assert_eq!(
            counts.to_string(),
            "Weapon.facility_id=2, Ammunition.facility_id=0"
        );
    }

    #[test]
    fn kind_parses_from_name() {
        assert_eq!(
            "StorageFacility".parse::<EntityKind>().unwrap(),
            EntityKind::StorageFacility
        );
        assert!("Tank".parse::<EntityKind>().is_err());
    }
}
