//! Weapon assignment CRUD operations.
//!
//! Creation, closing and deletion all go through the custody coordinator.
//! The only column edited in place is `notes`.

use std::sync::Arc;

use armory_domain::{
    AssignmentId, AssignmentStatus, EntityKind, Lifecycle, NewWeaponAssignment,
    WeaponAssignmentPatch,
};

use crate::infrastructure::ports::{AssignmentRecord, AssignmentRepo};
use crate::use_cases::custody::AssignmentCoordinator;
use crate::use_cases::error::CoreError;

pub struct AssignmentCrud {
    repo: Arc<dyn AssignmentRepo>,
    coordinator: Arc<AssignmentCoordinator>,
}

impl AssignmentCrud {
    pub fn new(repo: Arc<dyn AssignmentRepo>, coordinator: Arc<AssignmentCoordinator>) -> Self {
        Self { repo, coordinator }
    }

    pub async fn list(&self) -> Result<Vec<AssignmentRecord>, CoreError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: AssignmentId) -> Result<AssignmentRecord, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::WeaponAssignment, id))
    }

    pub async fn create(&self, input: NewWeaponAssignment) -> Result<AssignmentRecord, CoreError> {
        self.coordinator.create(input).await
    }

    /// Edits notes; a Returned or Lost status closes the assignment.
    pub async fn update(
        &self,
        id: AssignmentId,
        patch: WeaponAssignmentPatch,
    ) -> Result<AssignmentRecord, CoreError> {
        let current = self.get(id).await?;
        let requested = patch.status.filter(|status| *status != current.value.status);

        match requested {
            Some(AssignmentStatus::Returned) => {
                self.coordinator
                    .return_assignment(id, patch.return_date)
                    .await?;
            }
            Some(AssignmentStatus::Lost) => {
                self.coordinator.mark_lost(id, patch.return_date).await?;
            }
            Some(to) => {
                // Closed rows never reopen.
                current.value.status.transition_to(to)?;
            }
            None if patch.return_date.is_some() => {
                return Err(CoreError::validation(
                    "return_date is only set by returning or losing the weapon",
                ));
            }
            None => {}
        }

        if let Some(notes) = patch.notes {
            if !self.repo.update_notes(id, notes.trim()).await? {
                return Err(CoreError::not_found(EntityKind::WeaponAssignment, id));
            }
            tracing::info!(assignment_id = %id, "Assignment notes updated");
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: AssignmentId) -> Result<(), CoreError> {
        self.coordinator.remove(id).await
    }
}
