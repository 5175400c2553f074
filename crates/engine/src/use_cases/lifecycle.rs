//! Caller-triggered status recomputation.
//!
//! Nothing schedules this. A lot past its expiration date keeps its stored
//! status until someone runs the pass.

use std::sync::Arc;

use armory_domain::AmmunitionId;
use chrono::NaiveDate;

use super::error::CoreError;
use crate::infrastructure::ports::{AmmunitionRepo, ClockPort};

pub struct RefreshAmmunitionStatus {
    ammunition: Arc<dyn AmmunitionRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RefreshAmmunitionStatus {
    pub fn new(ammunition: Arc<dyn AmmunitionRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { ammunition, clock }
    }

    /// Marks empty lots Depleted and out-of-date lots Expired as of `today`
    /// (default: the clock's date). Returns the ids that changed.
    ///
    /// A lot edited between the read and the write keeps its new state; the
    /// store only applies the change if the guard still holds.
    pub async fn execute(&self, today: Option<NaiveDate>) -> Result<Vec<AmmunitionId>, CoreError> {
        let today = today.unwrap_or_else(|| self.clock.today());
        let mut changed = Vec::new();

        for lot in self.ammunition.list().await? {
            let Some(next) = lot.value.refreshed_status(today) else {
                continue;
            };
            if self
                .ammunition
                .refresh_status(lot.id, lot.value.status, next, today)
                .await?
            {
                tracing::info!(
                    ammunition_id = %lot.id,
                    from = %lot.value.status,
                    to = %next,
                    "Ammunition status refreshed"
                );
                changed.push(lot.id);
            }
        }

        tracing::debug!(today = %today, changed = changed.len(), "Ammunition refresh pass done");
        Ok(changed)
    }
}
