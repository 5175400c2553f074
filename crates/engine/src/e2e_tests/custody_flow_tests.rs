//! E2E tests for weapon custody.
//!
//! Tests verify:
//! - A weapon has at most one Active assignment
//! - Returning frees the weapon for a new assignment
//! - Rejected requests leave no rows behind

use std::sync::Arc;

use armory_domain::{
    AssignmentStatus, SoldierId, WeaponAssignmentPatch, WeaponPatch, WeaponStatus,
};

use super::{date, E2ETestContext};
use crate::use_cases::CoreError;

#[tokio::test]
async fn test_issue_conflict_return_reissue() {
    let ctx = E2ETestContext::setup().await;
    let s = ctx.seeded;
    let custody = &ctx.app.use_cases.custody;

    let first = custody
        .create(ctx.issue(s.weapon, s.soldier, date(2024, 1, 1)))
        .await
        .expect("first assignment should succeed");
    let weapon = ctx.app.use_cases.management.weapon.get(s.weapon).await.unwrap();
    assert_eq!(weapon.value.assigned_unit_id, Some(s.unit));

    let err = custody
        .create(ctx.issue(s.weapon, s.second_soldier, date(2024, 2, 1)))
        .await
        .expect_err("weapon is already issued");
    assert_eq!(err.kind(), "Conflict");

    let returned = custody
        .return_assignment(first.id, Some(date(2024, 3, 1)))
        .await
        .expect("return should succeed");
    assert_eq!(returned.value.status, AssignmentStatus::Returned);
    assert_eq!(returned.value.return_date, Some(date(2024, 3, 1)));
    let weapon = ctx.app.use_cases.management.weapon.get(s.weapon).await.unwrap();
    assert_eq!(weapon.value.assigned_unit_id, None);

    custody
        .create(ctx.issue(s.weapon, s.second_soldier, date(2024, 2, 1)))
        .await
        .expect("previously rejected request now succeeds");

    let active: Vec<_> = ctx
        .app
        .use_cases
        .management
        .assignment
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.value.weapon_id == s.weapon && a.value.is_active())
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].value.soldier_id, s.second_soldier);
}

#[tokio::test]
async fn test_unknown_soldier_is_rejected_without_writing() {
    let ctx = E2ETestContext::setup().await;
    let s = ctx.seeded;
    let assignments = &ctx.app.use_cases.management.assignment;
    let before = assignments.list().await.unwrap().len();

    let err = ctx
        .app
        .use_cases
        .custody
        .create(ctx.issue(s.weapon, SoldierId::new(999), date(2024, 1, 1)))
        .await
        .expect_err("soldier does not exist");
    assert!(matches!(
        err,
        CoreError::Reference {
            field: "soldier_id",
            value: 999,
            ..
        }
    ));

    assert_eq!(assignments.list().await.unwrap().len(), before);
    let weapon = ctx.app.use_cases.management.weapon.get(s.weapon).await.unwrap();
    assert_eq!(weapon.value.assigned_unit_id, None);
}

#[tokio::test]
async fn test_mark_lost_deactivates_weapon() {
    let ctx = E2ETestContext::setup().await;
    let s = ctx.seeded;
    let custody = &ctx.app.use_cases.custody;

    let assignment = custody
        .create(ctx.issue(s.weapon, s.soldier, date(2024, 1, 1)))
        .await
        .unwrap();
    let lost = custody.mark_lost(assignment.id, None).await.expect("lost");
    assert_eq!(lost.value.status, AssignmentStatus::Lost);
    assert_eq!(lost.value.return_date, Some(super::today()));

    let weapon = ctx.app.use_cases.management.weapon.get(s.weapon).await.unwrap();
    assert_eq!(weapon.value.status, WeaponStatus::Inactive);
    assert_eq!(weapon.value.assigned_unit_id, None);

    let err = custody
        .return_assignment(assignment.id, None)
        .await
        .expect_err("Lost is terminal");
    assert_eq!(err.kind(), "InvalidTransition");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_weapon_edits_racing_a_loss_keep_it_inactive() {
    let ctx = E2ETestContext::setup().await;
    let s = ctx.seeded;
    let assignment = ctx
        .app
        .use_cases
        .custody
        .create(ctx.issue(s.weapon, s.soldier, date(2024, 1, 1)))
        .await
        .unwrap();

    let mut edits = Vec::new();
    for round in 0..6 {
        let app = Arc::clone(&ctx.app);
        edits.push(tokio::spawn(async move {
            app.use_cases
                .management
                .weapon
                .update(
                    s.weapon,
                    WeaponPatch {
                        model: Some(format!("Gen{round}")),
                        ..Default::default()
                    },
                )
                .await
        }));
    }
    let lost = {
        let app = Arc::clone(&ctx.app);
        tokio::spawn(async move { app.use_cases.custody.mark_lost(assignment.id, None).await })
    };

    lost.await.expect("task should not panic").expect("lost");
    for edit in edits {
        edit.await.expect("task should not panic").expect("edit");
    }

    let weapon = ctx.app.use_cases.management.weapon.get(s.weapon).await.unwrap();
    assert_eq!(weapon.value.status, WeaponStatus::Inactive);
    assert_eq!(weapon.value.assigned_unit_id, None);
}

#[tokio::test]
async fn test_status_patch_routes_through_coordinator() {
    let ctx = E2ETestContext::setup().await;
    let s = ctx.seeded;
    let crud = &ctx.app.use_cases.management.assignment;

    let assignment = crud
        .create(ctx.issue(s.weapon, s.soldier, date(2024, 1, 1)))
        .await
        .unwrap();
    let updated = crud
        .update(
            assignment.id,
            WeaponAssignmentPatch {
                status: Some(AssignmentStatus::Returned),
                return_date: Some(date(2024, 4, 1)),
                notes: Some("  cleaned before return ".into()),
            },
        )
        .await
        .expect("patch closes the assignment");
    assert_eq!(updated.value.status, AssignmentStatus::Returned);
    assert_eq!(updated.value.notes, "cleaned before return");

    let weapon = ctx.app.use_cases.management.weapon.get(s.weapon).await.unwrap();
    assert_eq!(weapon.value.assigned_unit_id, None);
}

#[tokio::test]
async fn test_deleting_active_assignment_releases_weapon() {
    let ctx = E2ETestContext::setup().await;
    let s = ctx.seeded;
    let crud = &ctx.app.use_cases.management.assignment;

    let assignment = crud
        .create(ctx.issue(s.weapon, s.soldier, date(2024, 1, 1)))
        .await
        .unwrap();
    crud.delete(assignment.id).await.expect("delete");

    let err = crud.get(assignment.id).await.expect_err("row is gone");
    assert_eq!(err.kind(), "NotFound");
    let weapon = ctx.app.use_cases.management.weapon.get(s.weapon).await.unwrap();
    assert_eq!(weapon.value.assigned_unit_id, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issues_yield_one_active_assignment() {
    let ctx = E2ETestContext::setup().await;
    let s = ctx.seeded;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = Arc::clone(&ctx.app);
        let request = ctx.issue(s.weapon, s.soldier, date(2024, 1, 1));
        handles.push(tokio::spawn(async move {
            app.use_cases.custody.create(request).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            Ok(_) => created += 1,
            Err(err) => assert_eq!(err.kind(), "Conflict"),
        }
    }
    assert_eq!(created, 1);

    let active = ctx
        .app
        .use_cases
        .management
        .assignment
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.value.is_active())
        .count();
    assert_eq!(active, 1);
}

#[tokio::test]
async fn test_repeated_gets_are_identical() {
    let ctx = E2ETestContext::setup().await;
    let weapons = &ctx.app.use_cases.management.weapon;

    let first = weapons.get(ctx.seeded.weapon).await.unwrap();
    let second = weapons.get(ctx.seeded.weapon).await.unwrap();
    assert_eq!(first, second);
}
