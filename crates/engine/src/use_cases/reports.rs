//! Read-only views joining entities for display.

use std::sync::Arc;

use armory_domain::{
    AmmunitionStatus, AssignmentStatus, EntityKind, MaintenanceStatus, WeaponStatus,
};
use serde::Serialize;

use super::error::CoreError;
use crate::infrastructure::ports::{
    AmmunitionListing, AssignmentListing, FacilityOccupancy, MaintenanceListing,
    ManufacturerSummary, ReportRepo, StatusCount, UnitSummary, WeaponListing,
};

/// Row counts per status for the status-bearing kinds. Every status is
/// listed, with 0 when no row holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryOverview {
    pub weapons: Vec<StatusCount>,
    pub ammunition: Vec<StatusCount>,
    pub maintenance: Vec<StatusCount>,
    pub assignments: Vec<StatusCount>,
}

pub struct Reports {
    repo: Arc<dyn ReportRepo>,
}

impl Reports {
    pub fn new(repo: Arc<dyn ReportRepo>) -> Self {
        Self { repo }
    }

    pub async fn manufacturers(&self) -> Result<Vec<ManufacturerSummary>, CoreError> {
        Ok(self.repo.manufacturer_summaries().await?)
    }

    pub async fn units(&self) -> Result<Vec<UnitSummary>, CoreError> {
        Ok(self.repo.unit_summaries().await?)
    }

    pub async fn facilities(&self) -> Result<Vec<FacilityOccupancy>, CoreError> {
        Ok(self.repo.facility_occupancy().await?)
    }

    pub async fn weapons(&self) -> Result<Vec<WeaponListing>, CoreError> {
        Ok(self.repo.weapon_listings().await?)
    }

    pub async fn ammunition(&self) -> Result<Vec<AmmunitionListing>, CoreError> {
        Ok(self.repo.ammunition_listings().await?)
    }

    pub async fn maintenance(&self) -> Result<Vec<MaintenanceListing>, CoreError> {
        Ok(self.repo.maintenance_listings().await?)
    }

    pub async fn assignments(&self) -> Result<Vec<AssignmentListing>, CoreError> {
        Ok(self.repo.assignment_listings().await?)
    }

    pub async fn overview(&self) -> Result<InventoryOverview, CoreError> {
        Ok(InventoryOverview {
            weapons: self
                .counts(EntityKind::Weapon, WeaponStatus::ALL.iter().map(|s| s.as_str()))
                .await?,
            ammunition: self
                .counts(
                    EntityKind::Ammunition,
                    AmmunitionStatus::ALL.iter().map(|s| s.as_str()),
                )
                .await?,
            maintenance: self
                .counts(
                    EntityKind::WeaponMaintenance,
                    MaintenanceStatus::ALL.iter().map(|s| s.as_str()),
                )
                .await?,
            assignments: self
                .counts(
                    EntityKind::WeaponAssignment,
                    AssignmentStatus::ALL.iter().map(|s| s.as_str()),
                )
                .await?,
        })
    }

    async fn counts(
        &self,
        kind: EntityKind,
        statuses: impl Iterator<Item = &'static str>,
    ) -> Result<Vec<StatusCount>, CoreError> {
        let stored = self.repo.status_counts(kind).await?;
        Ok(with_zeros(statuses, &stored))
    }
}

/// One entry per status in declaration order, filling gaps with 0.
fn with_zeros(
    statuses: impl Iterator<Item = &'static str>,
    stored: &[StatusCount],
) -> Vec<StatusCount> {
    statuses
        .map(|status| StatusCount {
            status: status.to_string(),
            count: stored
                .iter()
                .find(|c| c.status == status)
                .map(|c| c.count)
                .unwrap_or(0),
        })
        .collect()
}
