//! Deletion guard: hard deletes only when nothing depends on the row.

use std::sync::Arc;

use armory_domain::{DependentCounts, EntityKind};

use super::error::CoreError;
use crate::infrastructure::ports::{DeleteOutcome, ReferenceRepo};

pub struct DeletionGuard {
    references: Arc<dyn ReferenceRepo>,
}

impl DeletionGuard {
    pub fn new(references: Arc<dyn ReferenceRepo>) -> Self {
        Self { references }
    }

    /// Dependent counts for an existing row, zeros included. Read-only.
    pub async fn dependents(&self, kind: EntityKind, id: i64) -> Result<DependentCounts, CoreError> {
        if !self.references.exists(kind, id).await? {
            return Err(CoreError::not_found(kind, id));
        }
        Ok(self.references.count_dependents(kind, id).await?)
    }

    /// Fails with `Blocked` while any row depends on `id`.
    pub async fn before_delete(&self, kind: EntityKind, id: i64) -> Result<(), CoreError> {
        let dependents = self.dependents(kind, id).await?;
        if dependents.is_clear() {
            Ok(())
        } else {
            Err(CoreError::Blocked {
                kind,
                id,
                dependents,
            })
        }
    }

    /// Deletes the row if nothing depends on it. The count and the delete
    /// run in one store transaction.
    pub async fn delete(&self, kind: EntityKind, id: i64) -> Result<(), CoreError> {
        match self.references.delete_unreferenced(kind, id).await? {
            DeleteOutcome::Deleted => {
                tracing::info!(kind = %kind, id, "Deleted");
                Ok(())
            }
            DeleteOutcome::Missing => Err(CoreError::not_found(kind, id)),
            DeleteOutcome::Blocked(dependents) => {
                tracing::warn!(kind = %kind, id, dependents = %dependents, "Delete blocked");
                Err(CoreError::Blocked {
                    kind,
                    id,
                    dependents,
                })
            }
        }
    }
}
