//! Weapon custody: issuing, returning and losing weapons.
//!
//! This is the only workflow that spans two entities. An assignment row
//! and its weapon's `assigned_unit_id` always change in one store
//! transaction, and operations on the same weapon run one at a time.

mod locks;

pub use locks::{CustodyGuard, CustodyLocks};

use std::sync::Arc;

use armory_domain::{
    AssignmentId, AssignmentStatus, EntityKind, NewWeaponAssignment, Record, WeaponStatus,
};
use chrono::NaiveDate;

use super::error::CoreError;
use super::validation::ReferenceValidator;
use crate::infrastructure::ports::{AssignmentRecord, AssignmentRepo, ClockPort, CustodyRepo};

/// Coordinates every change to who holds a weapon.
pub struct AssignmentCoordinator {
    assignments: Arc<dyn AssignmentRepo>,
    custody: Arc<dyn CustodyRepo>,
    validator: Arc<ReferenceValidator>,
    clock: Arc<dyn ClockPort>,
    locks: Arc<CustodyLocks>,
}

impl AssignmentCoordinator {
    pub fn new(
        assignments: Arc<dyn AssignmentRepo>,
        custody: Arc<dyn CustodyRepo>,
        validator: Arc<ReferenceValidator>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            assignments,
            custody,
            validator,
            clock,
            locks: Arc::new(CustodyLocks::new()),
        }
    }

    /// The per-weapon locks, for other writers of custody-owned weapon columns.
    pub fn locks(&self) -> Arc<CustodyLocks> {
        self.locks.clone()
    }

    /// Issues a weapon to a soldier of a unit.
    ///
    /// # Errors
    ///
    /// - `RefError` if the weapon, soldier or unit does not exist
    /// - `Conflict` if the weapon already has an Active assignment
    pub async fn create(&self, request: NewWeaponAssignment) -> Result<AssignmentRecord, CoreError> {
        let assignment = request.into_assignment()?;
        let weapon_id = assignment.weapon_id;
        let _guard = self.locks.acquire(weapon_id).await;

        self.validator
            .validate(EntityKind::WeaponAssignment, &assignment.references())
            .await?;

        if let Some(active) = self.assignments.find_active_for_weapon(weapon_id).await? {
            tracing::warn!(
                weapon_id = %weapon_id,
                active_assignment_id = %active.id,
                "Rejected assignment: weapon already issued"
            );
            return Err(CoreError::conflict(format!(
                "Weapon {} already has an active assignment ({})",
                weapon_id, active.id
            )));
        }

        let id = self.custody.open(&assignment).await.map_err(|e| {
            tracing::warn!(weapon_id = %weapon_id, error = %e, "Store rejected assignment");
            CoreError::from(e)
        })?;

        tracing::info!(
            assignment_id = %id,
            weapon_id = %weapon_id,
            soldier_id = %assignment.soldier_id,
            unit_id = %assignment.unit_id,
            "Weapon assigned"
        );
        Ok(Record::new(id, assignment))
    }

    /// Ends an Active assignment with the weapon back in stock.
    pub async fn return_assignment(
        &self,
        id: AssignmentId,
        date: Option<NaiveDate>,
    ) -> Result<AssignmentRecord, CoreError> {
        self.close(id, AssignmentStatus::Returned, date, None).await
    }

    /// Ends an Active assignment with the weapon lost. The weapon also
    /// becomes Inactive.
    pub async fn mark_lost(
        &self,
        id: AssignmentId,
        date: Option<NaiveDate>,
    ) -> Result<AssignmentRecord, CoreError> {
        self.close(id, AssignmentStatus::Lost, date, Some(WeaponStatus::Inactive))
            .await
    }

    /// Deletes an assignment row. Deleting an Active one releases the weapon.
    pub async fn remove(&self, id: AssignmentId) -> Result<(), CoreError> {
        let current = self.require(id).await?;
        let _guard = self.locks.acquire(current.value.weapon_id).await;

        if !self.custody.remove(id).await? {
            return Err(CoreError::not_found(EntityKind::WeaponAssignment, id));
        }
        tracing::info!(
            assignment_id = %id,
            weapon_id = %current.value.weapon_id,
            unit_id = %current.value.unit_id,
            was_active = current.value.is_active(),
            "Assignment deleted"
        );
        Ok(())
    }

    async fn close(
        &self,
        id: AssignmentId,
        to: AssignmentStatus,
        date: Option<NaiveDate>,
        weapon_status: Option<WeaponStatus>,
    ) -> Result<AssignmentRecord, CoreError> {
        let weapon_id = self.require(id).await?.value.weapon_id;
        let _guard = self.locks.acquire(weapon_id).await;

        // Re-read under the lock; another request may have closed it meanwhile.
        let mut record = self.require(id).await?;
        let date = date.unwrap_or_else(|| self.clock.today());
        if let Err(e) = record.value.close(to, date) {
            tracing::warn!(
                assignment_id = %id,
                weapon_id = %weapon_id,
                from = %record.value.status,
                to = %to,
                "Rejected custody change"
            );
            return Err(e.into());
        }

        self.custody.close(id, &record.value, weapon_status).await?;

        tracing::info!(
            assignment_id = %id,
            weapon_id = %weapon_id,
            unit_id = %record.value.unit_id,
            status = %to,
            "Assignment closed"
        );
        Ok(record)
    }

    async fn require(&self, id: AssignmentId) -> Result<AssignmentRecord, CoreError> {
        self.assignments
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::WeaponAssignment, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        MockAssignmentRepo, MockCustodyRepo, MockReferenceRepo, RepoError,
    };
    use armory_domain::{SoldierId, UnitId, WeaponAssignment, WeaponId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn all_references_exist() -> MockReferenceRepo {
        let mut refs = MockReferenceRepo::new();
        refs.expect_exists().returning(|_, _| Ok(true));
        refs
    }

    fn coordinator(
        assignments: MockAssignmentRepo,
        custody: MockCustodyRepo,
        refs: MockReferenceRepo,
    ) -> AssignmentCoordinator {
        AssignmentCoordinator::new(
            Arc::new(assignments),
            Arc::new(custody),
            Arc::new(ReferenceValidator::new(Arc::new(refs))),
            Arc::new(FixedClock(date(2024, 6, 1))),
        )
    }

    fn request(weapon: i64, soldier: i64, unit: i64) -> NewWeaponAssignment {
        NewWeaponAssignment {
            weapon_id: Some(WeaponId::new(weapon)),
            soldier_id: Some(SoldierId::new(soldier)),
            unit_id: Some(UnitId::new(unit)),
            assignment_date: Some(date(2024, 1, 1)),
            notes: None,
        }
    }

    fn active_record(id: i64) -> AssignmentRecord {
        Record::new(
            AssignmentId::new(id),
            WeaponAssignment::open(
                WeaponId::new(10),
                SoldierId::new(5),
                UnitId::new(2),
                date(2024, 1, 1),
            ),
        )
    }

    #[tokio::test]
    async fn create_opens_custody_when_weapon_is_free() {
        let mut assignments = MockAssignmentRepo::new();
        assignments
            .expect_find_active_for_weapon()
            .withf(|weapon_id| *weapon_id == WeaponId::new(10))
            .returning(|_| Ok(None));

        let mut custody = MockCustodyRepo::new();
        custody
            .expect_open()
            .withf(|a| a.unit_id == UnitId::new(2) && a.status == AssignmentStatus::Active)
            .times(1)
            .returning(|_| Ok(AssignmentId::new(1)));

        let created = coordinator(assignments, custody, all_references_exist())
            .create(request(10, 5, 2))
            .await
            .expect("created");
        assert_eq!(created.id, AssignmentId::new(1));
        assert!(created.value.is_active());
        assert_eq!(created.value.return_date, None);
    }

    #[tokio::test]
    async fn create_conflicts_when_weapon_already_issued() {
        let mut assignments = MockAssignmentRepo::new();
        assignments
            .expect_find_active_for_weapon()
            .returning(|_| Ok(Some(active_record(1))));

        let mut custody = MockCustodyRepo::new();
        custody.expect_open().never();

        let err = coordinator(assignments, custody, all_references_exist())
            .create(request(10, 6, 2))
            .await
            .expect_err("second active assignment");
        assert_eq!(err.kind(), "Conflict");
    }

    #[tokio::test]
    async fn create_with_unknown_soldier_is_a_reference_error() {
        let mut refs = MockReferenceRepo::new();
        refs.expect_exists()
            .returning(|kind, _| Ok(kind != EntityKind::Soldier));

        let mut assignments = MockAssignmentRepo::new();
        assignments.expect_find_active_for_weapon().never();
        let mut custody = MockCustodyRepo::new();
        custody.expect_open().never();

        let err = coordinator(assignments, custody, refs)
            .create(request(10, 99, 2))
            .await
            .expect_err("unknown soldier");
        assert!(matches!(
            err,
            CoreError::Reference {
                field: "soldier_id",
                value: 99,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn create_maps_store_race_to_conflict() {
        let mut assignments = MockAssignmentRepo::new();
        assignments
            .expect_find_active_for_weapon()
            .returning(|_| Ok(None));
        let mut custody = MockCustodyRepo::new();
        custody.expect_open().returning(|_| {
            Err(RepoError::constraint(
                "WeaponAssignment",
                "UNIQUE constraint failed: weapon_assignments.weapon_id",
            ))
        });

        let err = coordinator(assignments, custody, all_references_exist())
            .create(request(10, 5, 2))
            .await
            .expect_err("index rejects");
        assert_eq!(err.kind(), "Conflict");
    }

    #[tokio::test]
    async fn create_requires_all_fields() {
        let err = coordinator(
            MockAssignmentRepo::new(),
            MockCustodyRepo::new(),
            MockReferenceRepo::new(),
        )
        .create(NewWeaponAssignment::default())
        .await
        .expect_err("empty request");
        assert_eq!(err.kind(), "ValidationError");
    }

    #[tokio::test]
    async fn return_closes_and_keeps_weapon_status() {
        let mut assignments = MockAssignmentRepo::new();
        assignments
            .expect_get()
            .returning(|id| Ok(Some(active_record(id.get()))));

        let mut custody = MockCustodyRepo::new();
        custody
            .expect_close()
            .withf(|id, closed, weapon_status| {
                *id == AssignmentId::new(1)
                    && closed.status == AssignmentStatus::Returned
                    && closed.return_date == Some(NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"))
                    && weapon_status.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let closed = coordinator(assignments, custody, MockReferenceRepo::new())
            .return_assignment(AssignmentId::new(1), Some(date(2024, 3, 1)))
            .await
            .expect("returned");
        assert_eq!(closed.value.status, AssignmentStatus::Returned);
        assert!(closed.value.is_consistent());
    }

    #[tokio::test]
    async fn mark_lost_deactivates_weapon_and_defaults_to_today() {
        let mut assignments = MockAssignmentRepo::new();
        assignments
            .expect_get()
            .returning(|id| Ok(Some(active_record(id.get()))));

        let mut custody = MockCustodyRepo::new();
        custody
            .expect_close()
            .withf(|_, closed, weapon_status| {
                closed.status == AssignmentStatus::Lost
                    && *weapon_status == Some(WeaponStatus::Inactive)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let closed = coordinator(assignments, custody, MockReferenceRepo::new())
            .mark_lost(AssignmentId::new(1), None)
            .await
            .expect("lost");
        assert_eq!(closed.value.return_date, Some(date(2024, 6, 1)));
    }

    #[tokio::test]
    async fn closing_a_closed_assignment_is_an_invalid_transition() {
        let mut assignments = MockAssignmentRepo::new();
        assignments.expect_get().returning(|id| {
            let mut record = active_record(id.get());
            record
                .value
                .close(AssignmentStatus::Returned, NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"))
                .expect("close");
            Ok(Some(record))
        });
        let mut custody = MockCustodyRepo::new();
        custody.expect_close().never();

        let err = coordinator(assignments, custody, MockReferenceRepo::new())
            .mark_lost(AssignmentId::new(1), Some(date(2024, 3, 1)))
            .await
            .expect_err("already returned");
        assert_eq!(err.kind(), "InvalidTransition");
    }

    #[tokio::test]
    async fn return_date_before_assignment_date_is_rejected() {
        let mut assignments = MockAssignmentRepo::new();
        assignments
            .expect_get()
            .returning(|id| Ok(Some(active_record(id.get()))));
        let mut custody = MockCustodyRepo::new();
        custody.expect_close().never();

        let err = coordinator(assignments, custody, MockReferenceRepo::new())
            .return_assignment(AssignmentId::new(1), Some(date(2023, 12, 31)))
            .await
            .expect_err("date precedes issue");
        assert_eq!(err.kind(), "ValidationError");
    }

    #[tokio::test]
    async fn unknown_assignment_is_not_found() {
        let mut assignments = MockAssignmentRepo::new();
        assignments.expect_get().returning(|_| Ok(None));

        let err = coordinator(assignments, MockCustodyRepo::new(), MockReferenceRepo::new())
            .return_assignment(AssignmentId::new(42), None)
            .await
            .expect_err("missing");
        assert_eq!(err.kind(), "NotFound");
    }
}
