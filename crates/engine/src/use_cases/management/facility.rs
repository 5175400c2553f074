//! Storage facility CRUD operations.
//!
//! Decommissioning is gated like deletion: it fails while weapons or
//! ammunition are still stored at the facility.

use std::sync::Arc;

use armory_domain::{EntityKind, FacilityId, NewStorageFacility, Record, StorageFacilityPatch};

use crate::infrastructure::ports::{FacilityRecord, FacilityRepo};
use crate::use_cases::deletion::DeletionGuard;
use crate::use_cases::error::CoreError;

pub struct FacilityCrud {
    repo: Arc<dyn FacilityRepo>,
    guard: Arc<DeletionGuard>,
}

impl FacilityCrud {
    pub fn new(repo: Arc<dyn FacilityRepo>, guard: Arc<DeletionGuard>) -> Self {
        Self { repo, guard }
    }

    pub async fn list(&self) -> Result<Vec<FacilityRecord>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: FacilityId) -> Result<FacilityRecord, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::StorageFacility, id))
    }

    pub async fn create(&self, input: NewStorageFacility) -> Result<FacilityRecord, CoreError> {
        let facility = input.into_facility()?;
        let id = self.repo.insert(&facility).await?;
        tracing::info!(facility_id = %id, name = %facility.name, "Facility created");
        Ok(Record::new(id, facility))
    }

    pub async fn update(
        &self,
        id: FacilityId,
        patch: StorageFacilityPatch,
    ) -> Result<FacilityRecord, CoreError> {
        let mut record = self.get(id).await?;
        let decommissioning = patch.decommissions(&record.value);
        patch.apply(&mut record.value)?;
        if decommissioning {
            self.guard
                .before_delete(EntityKind::StorageFacility, id.get())
                .await?;
        }
        if !self.repo.update(id, &record.value).await? {
            return Err(CoreError::not_found(EntityKind::StorageFacility, id));
        }
        tracing::info!(facility_id = %id, status = %record.value.status, "Facility updated");
        Ok(record)
    }

    pub async fn delete(&self, id: FacilityId) -> Result<(), CoreError> {
        self.guard.delete(EntityKind::StorageFacility, id.get()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockFacilityRepo, MockReferenceRepo};
    use armory_domain::{DependentCount, DependentCounts, FacilityStatus, StorageFacility};

    fn facility_repo() -> MockFacilityRepo {
        let mut repo = MockFacilityRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Record::new(id, StorageFacility::new("North Depot")))));
        repo
    }

    fn refs_with_weapons(weapons: u64) -> MockReferenceRepo {
        let mut refs = MockReferenceRepo::new();
        refs.expect_exists().returning(|_, _| Ok(true));
        refs.expect_count_dependents().returning(move |_, _| {
            Ok(DependentCounts::new(vec![
                DependentCount {
                    kind: EntityKind::Weapon,
                    field: "facility_id",
                    count: weapons,
                },
                DependentCount {
                    kind: EntityKind::Ammunition,
                    field: "facility_id",
                    count: 0,
                },
            ]))
        });
        refs
    }

    fn decommission() -> StorageFacilityPatch {
        StorageFacilityPatch {
            status: Some(FacilityStatus::Decommissioned),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn decommission_is_blocked_while_stock_remains() {
        let mut repo = facility_repo();
        repo.expect_update().never();
        let crud = FacilityCrud::new(
            Arc::new(repo),
            Arc::new(DeletionGuard::new(Arc::new(refs_with_weapons(3)))),
        );

        let err = crud
            .update(FacilityId::new(1), decommission())
            .await
            .expect_err("blocked");
        assert_eq!(err.kind(), "Blocked");
    }

    #[tokio::test]
    async fn empty_facility_can_be_decommissioned() {
        let mut repo = facility_repo();
        repo.expect_update()
            .withf(|_, f| f.status == FacilityStatus::Decommissioned)
            .times(1)
            .returning(|_, _| Ok(true));
        let crud = FacilityCrud::new(
            Arc::new(repo),
            Arc::new(DeletionGuard::new(Arc::new(refs_with_weapons(0)))),
        );

        let updated = crud
            .update(FacilityId::new(1), decommission())
            .await
            .expect("decommissioned");
        assert_eq!(updated.value.status, FacilityStatus::Decommissioned);
    }

    #[tokio::test]
    async fn decommissioned_is_terminal() {
        let mut repo = MockFacilityRepo::new();
        repo.expect_get().returning(|id| {
            let mut facility = StorageFacility::new("Old Depot");
            facility.status = FacilityStatus::Decommissioned;
            Ok(Some(Record::new(id, facility)))
        });
        repo.expect_update().never();
        let crud = FacilityCrud::new(
            Arc::new(repo),
            Arc::new(DeletionGuard::new(Arc::new(MockReferenceRepo::new()))),
        );

        let err = crud
            .update(
                FacilityId::new(1),
                StorageFacilityPatch {
                    status: Some(FacilityStatus::Operational),
                    ..Default::default()
                },
            )
            .await
            .expect_err("terminal");
        assert_eq!(err.kind(), "InvalidTransition");
    }
}
