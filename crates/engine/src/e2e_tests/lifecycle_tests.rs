//! E2E tests for stored statuses and the refresh pass.

use std::sync::Arc;

use armory_domain::{Ammunition, AmmunitionId, AmmunitionPatch, AmmunitionStatus};
use async_trait::async_trait;
use chrono::NaiveDate;

use super::{date, today, E2ETestContext};
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::ports::{AmmunitionRecord, AmmunitionRepo, RepoError};
use crate::use_cases::RefreshAmmunitionStatus;

/// Store wrapper that restocks every lot right after the pass lists them.
struct RestockAfterList {
    inner: Arc<dyn AmmunitionRepo>,
}

#[async_trait]
impl AmmunitionRepo for RestockAfterList {
    async fn get(&self, id: AmmunitionId) -> Result<Option<AmmunitionRecord>, RepoError> {
        self.inner.get(id).await
    }

    async fn list(&self) -> Result<Vec<AmmunitionRecord>, RepoError> {
        let snapshot = self.inner.list().await?;
        for lot in &snapshot {
            let mut restocked = lot.value.clone();
            restocked.quantity = 100;
            self.inner.update(lot.id, &restocked).await?;
        }
        Ok(snapshot)
    }

    async fn insert(&self, lot: &Ammunition) -> Result<AmmunitionId, RepoError> {
        self.inner.insert(lot).await
    }

    async fn update(&self, id: AmmunitionId, lot: &Ammunition) -> Result<bool, RepoError> {
        self.inner.update(id, lot).await
    }

    async fn refresh_status(
        &self,
        id: AmmunitionId,
        from: AmmunitionStatus,
        to: AmmunitionStatus,
        today: NaiveDate,
    ) -> Result<bool, RepoError> {
        self.inner.refresh_status(id, from, to, today).await
    }
}

#[tokio::test]
async fn test_expired_lot_stays_available_until_refresh() {
    let ctx = E2ETestContext::setup().await;
    let ammunition = &ctx.app.use_cases.management.ammunition;

    let lot = ammunition
        .create(ctx.lot(50, date(2023, 1, 10)))
        .await
        .expect("past expiration is accepted on create");
    assert_eq!(lot.value.status, AmmunitionStatus::Available);

    // Reads never recompute the stored status.
    let read = ammunition.get(lot.id).await.unwrap();
    assert_eq!(read.value.status, AmmunitionStatus::Available);

    let changed = ctx
        .app
        .use_cases
        .refresh_ammunition
        .execute(None)
        .await
        .expect("refresh pass");
    assert_eq!(changed, vec![lot.id]);
    let read = ammunition.get(lot.id).await.unwrap();
    assert_eq!(read.value.status, AmmunitionStatus::Expired);

    let changed = ctx
        .app
        .use_cases
        .refresh_ammunition
        .execute(Some(today()))
        .await
        .unwrap();
    assert!(changed.is_empty(), "terminal lots are left alone");
}

#[tokio::test]
async fn test_refresh_depletes_empty_lots_and_skips_fresh_ones() {
    let ctx = E2ETestContext::setup().await;
    let ammunition = &ctx.app.use_cases.management.ammunition;

    let fresh = ammunition.create(ctx.lot(10, date(2030, 1, 1))).await.unwrap();
    ammunition
        .update(
            fresh.id,
            AmmunitionPatch {
                quantity: Some(0),
                ..Default::default()
            },
        )
        .await
        .expect("quantity can drop to zero");
    let untouched = ammunition.create(ctx.lot(10, date(2030, 1, 1))).await.unwrap();

    let changed = ctx
        .app
        .use_cases
        .refresh_ammunition
        .execute(Some(date(2024, 6, 1)))
        .await
        .unwrap();
    assert_eq!(changed, vec![fresh.id]);
    assert_eq!(
        ammunition.get(fresh.id).await.unwrap().value.status,
        AmmunitionStatus::Depleted
    );
    assert_eq!(
        ammunition.get(untouched.id).await.unwrap().value.status,
        AmmunitionStatus::Available
    );
}

#[tokio::test]
async fn test_restock_during_refresh_is_not_depleted() {
    let ctx = E2ETestContext::setup().await;
    let lot = ctx
        .app
        .use_cases
        .management
        .ammunition
        .create(ctx.lot(0, date(2030, 1, 1)))
        .await
        .unwrap();

    let refresh = RefreshAmmunitionStatus::new(
        Arc::new(RestockAfterList {
            inner: ctx.app.repositories.ammunition.clone(),
        }),
        Arc::new(FixedClock(today())),
    );
    let changed = refresh.execute(None).await.expect("refresh pass");
    assert!(changed.is_empty());

    let stored = ctx.app.use_cases.management.ammunition.get(lot.id).await.unwrap();
    assert_eq!(stored.value.quantity, 100);
    assert_eq!(stored.value.status, AmmunitionStatus::Available);
}

#[tokio::test]
async fn test_overview_counts_statuses_after_refresh() {
    let ctx = E2ETestContext::setup().await;
    ctx.app
        .use_cases
        .management
        .ammunition
        .create(ctx.lot(5, date(2023, 1, 10)))
        .await
        .unwrap();
    ctx.app.use_cases.refresh_ammunition.execute(None).await.unwrap();

    let overview = ctx.app.use_cases.reports.overview().await.unwrap();
    let expired = overview
        .ammunition
        .iter()
        .find(|c| c.status == "Expired")
        .expect("every status listed");
    assert_eq!(expired.count, 1);
    let weapons_active = overview
        .weapons
        .iter()
        .find(|c| c.status == "Active")
        .expect("every status listed");
    assert_eq!(weapons_active.count, 1);
    assert!(overview.assignments.iter().all(|c| c.count == 0));
}
