//! Reference validation for use cases.
//!
//! Every write checks its foreign keys here before touching the store.

use std::sync::Arc;

use armory_domain::{EntityKind, FacilityId, FacilityStatus, Reference};

use super::error::CoreError;
use crate::infrastructure::ports::ReferenceRepo;

/// Confirms that every non-null foreign key of a row resolves.
pub struct ReferenceValidator {
    references: Arc<dyn ReferenceRepo>,
}

impl ReferenceValidator {
    pub fn new(references: Arc<dyn ReferenceRepo>) -> Self {
        Self { references }
    }

    /// Checks `references` in order and reports the first one that does not
    /// resolve. Absent optional references always pass. Read-only.
    pub async fn validate(
        &self,
        kind: EntityKind,
        references: &[Reference],
    ) -> Result<(), CoreError> {
        for reference in references {
            let Some(id) = reference.id else {
                continue;
            };
            if !self.references.exists(reference.target, id).await? {
                tracing::debug!(
                    kind = %kind,
                    field = reference.field,
                    value = id,
                    "Unresolved reference"
                );
                return Err(CoreError::Reference {
                    field: reference.field,
                    target: reference.target,
                    value: id,
                });
            }
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), but only for references whose value
    /// differs from `before`.
    pub async fn validate_changed(
        &self,
        kind: EntityKind,
        before: &[Reference],
        after: &[Reference],
    ) -> Result<(), CoreError> {
        let changed: Vec<Reference> = after
            .iter()
            .filter(|reference| !before.contains(reference))
            .copied()
            .collect();
        self.validate(kind, &changed).await
    }

    /// Rejects placing new stock in a Decommissioned facility. A missing
    /// facility is left to [`validate`](Self::validate).
    pub async fn ensure_accepts_stock(
        &self,
        kind: EntityKind,
        facility: FacilityId,
    ) -> Result<(), CoreError> {
        let status = self.references.facility_status(facility).await?;
        if status == Some(FacilityStatus::Decommissioned) {
            tracing::warn!(
                kind = %kind,
                facility_id = %facility,
                "Rejected stock for decommissioned facility"
            );
            return Err(CoreError::conflict(format!(
                "StorageFacility {} is Decommissioned and cannot take new {}",
                facility, kind
            )));
        }
        Ok(())
    }
}
