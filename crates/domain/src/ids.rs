use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned row identifiers.
///
/// Every entity kind gets its own newtype so a `SoldierId` can never be
/// handed to a weapon lookup. Ids are transparent integers on the wire.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Organisation and storage
define_id!(ManufacturerId);
define_id!(UnitId);
define_id!(FacilityId);

// Equipment
define_id!(WeaponId);
define_id!(AmmunitionId);

// Personnel
define_id!(SoldierId);

// Custody and upkeep records
define_id!(AssignmentId);
define_id!(MaintenanceId);
