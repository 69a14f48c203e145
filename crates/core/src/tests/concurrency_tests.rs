// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes that race another writer between read and save.

use timesheet_audit::{AuditEvent, actions};
use timesheet_domain::{EditPolicy, Timesheet, TimesheetStatus};

use crate::{
    CoreError, TimesheetStore, WorkflowConfig, admin_override, list_mine, review_action,
    submit_mine, upsert_mine,
};

use super::helpers::{
    MemoryStore, admin, later, now, row, seeded_store, snapshot, super1, week, worker,
};

/// Creates the worker's week-32 timesheet with one row "A" and moves it to
/// `status`.
fn existing(store: &mut MemoryStore, status: TimesheetStatus) -> Timesheet {
    let created: Timesheet = upsert_mine(
        store,
        &worker(),
        &WorkflowConfig::default(),
        snapshot(week(2025, 32), vec![row("A", 800)], None),
        now(),
    )
    .unwrap();
    if status == TimesheetStatus::Draft {
        return created;
    }
    admin_override(
        store,
        &admin(),
        created.timesheet_id.unwrap(),
        status,
        now(),
    )
    .unwrap()
}

fn last_event(store: &MemoryStore) -> AuditEvent {
    store.events().last().cloned().unwrap()
}

#[test]
fn test_lost_create_race_becomes_update() {
    let mut store: MemoryStore = seeded_store();
    let first: Timesheet = existing(&mut store, TimesheetStatus::Draft);

    store.hide_next_lookup = true;
    let second: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &WorkflowConfig::default(),
        snapshot(week(2025, 32), vec![row("B", 300)], None),
        later(),
    )
    .unwrap();

    assert_eq!(second.timesheet_id, first.timesheet_id);
    assert_eq!(second.created_at, now());
    assert_eq!(store.timesheet_count(), 1);
    assert_eq!(second.rows[0].project_or_task, "B");
    let event: AuditEvent = last_event(&store);
    assert_eq!(event.action.name, actions::UPDATE_TIMESHEET);
    assert_eq!(event.before, Some(TimesheetStatus::Draft));
}

#[test]
fn test_lost_create_race_keeps_existing_status() {
    for status in [TimesheetStatus::Submitted, TimesheetStatus::Declined] {
        let mut store: MemoryStore = seeded_store();
        existing(&mut store, status);

        store.hide_next_lookup = true;
        let updated: Timesheet = upsert_mine(
            &mut store,
            &worker(),
            &WorkflowConfig::default(),
            snapshot(week(2025, 32), vec![row("B", 300)], None),
            later(),
        )
        .unwrap();

        assert_eq!(updated.status, status);
        assert_eq!(updated.rows[0].project_or_task, "B");
        let event: AuditEvent = last_event(&store);
        assert_eq!(event.action.name, actions::UPDATE_TIMESHEET);
        assert_eq!(event.before, Some(status));
        assert_eq!(event.after, status);
    }
}

#[test]
fn test_lost_create_race_respects_edit_policy() {
    let mut store: MemoryStore = seeded_store();
    existing(&mut store, TimesheetStatus::Submitted);
    let events_before: usize = store.events().len();

    store.hide_next_lookup = true;
    let result = upsert_mine(
        &mut store,
        &worker(),
        &WorkflowConfig::new(EditPolicy::LockSubmittedAndApproved),
        snapshot(week(2025, 32), vec![row("B", 300)], None),
        later(),
    );

    assert!(matches!(result, Err(CoreError::InvalidState(_))));
    let stored: Timesheet = list_mine(&mut store, &worker(), None, None).unwrap().remove(0);
    assert_eq!(stored.status, TimesheetStatus::Submitted);
    assert_eq!(stored.rows[0].project_or_task, "A");
    assert_eq!(store.events().len(), events_before);
}

#[test]
fn test_lost_create_race_against_approved_is_locked() {
    let mut store: MemoryStore = seeded_store();
    existing(&mut store, TimesheetStatus::Approved);

    store.hide_next_lookup = true;
    let result = upsert_mine(
        &mut store,
        &worker(),
        &WorkflowConfig::default(),
        snapshot(week(2025, 32), vec![row("B", 300)], None),
        later(),
    );

    assert!(matches!(result, Err(CoreError::InvalidState(_))));
    assert_eq!(store.timesheet_count(), 1);
}

#[test]
fn test_approval_between_read_and_save_blocks_edit() {
    let mut store: MemoryStore = seeded_store();
    let draft: Timesheet = existing(&mut store, TimesheetStatus::Draft);

    store.status_change_before_next_save = Some(TimesheetStatus::Approved);
    let result = upsert_mine(
        &mut store,
        &worker(),
        &WorkflowConfig::default(),
        snapshot(week(2025, 32), vec![row("EDITED", 100)], None),
        later(),
    );

    assert!(matches!(result, Err(CoreError::InvalidState(_))));
    let stored: Timesheet = store
        .find_by_id(draft.timesheet_id.unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, TimesheetStatus::Approved);
    assert_eq!(stored.rows[0].project_or_task, "A");
}

#[test]
fn test_submit_between_read_and_save_is_retried() {
    let mut store: MemoryStore = seeded_store();
    existing(&mut store, TimesheetStatus::Draft);

    store.status_change_before_next_save = Some(TimesheetStatus::Submitted);
    let updated: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &WorkflowConfig::default(),
        snapshot(week(2025, 32), vec![row("B", 300)], None),
        later(),
    )
    .unwrap();

    assert_eq!(updated.status, TimesheetStatus::Submitted);
    assert_eq!(last_event(&store).before, Some(TimesheetStatus::Submitted));
}

#[test]
fn test_stale_review_is_a_conflict() {
    let mut store: MemoryStore = seeded_store();
    let draft: Timesheet = existing(&mut store, TimesheetStatus::Draft);
    let id: i64 = draft.timesheet_id.unwrap();
    let events_before: usize = store.events().len();

    store.status_change_before_next_save = Some(TimesheetStatus::Declined);
    let result = review_action(&mut store, &super1(), id, true, None, later());

    assert!(matches!(result, Err(CoreError::Conflict(_))));
    assert_eq!(
        store.find_by_id(id).unwrap().unwrap().status,
        TimesheetStatus::Declined
    );
    assert_eq!(store.events().len(), events_before);
}

#[test]
fn test_stale_submit_is_a_conflict() {
    let mut store: MemoryStore = seeded_store();
    existing(&mut store, TimesheetStatus::Draft);

    store.status_change_before_next_save = Some(TimesheetStatus::Approved);
    let result = submit_mine(&mut store, &worker(), week(2025, 32), later());

    assert!(matches!(result, Err(CoreError::Conflict(_))));
}
