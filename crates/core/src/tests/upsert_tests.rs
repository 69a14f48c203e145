// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timesheet_audit::actions;
use timesheet_domain::{EditPolicy, Timesheet, TimesheetStatus};

use crate::{CoreError, TimesheetStore, WorkflowConfig, admin_override, list_mine, upsert_mine};

use super::helpers::{MemoryStore, admin, later, now, row, seeded_store, snapshot, week, worker};

#[test]
fn test_first_edit_creates_draft() {
    let mut store: MemoryStore = seeded_store();

    let timesheet: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &WorkflowConfig::default(),
        snapshot(week(2025, 32), vec![row("A", 800)], None),
        now(),
    )
    .unwrap();

    assert!(timesheet.timesheet_id.is_some());
    assert_eq!(timesheet.status, TimesheetStatus::Draft);
    assert_eq!(timesheet.owner, worker().as_owner());
    assert_eq!(timesheet.rows.len(), 1);
    assert!(timesheet.rows[0].row_id.is_some());
    assert_eq!(timesheet.created_at, now());
    assert_eq!(timesheet.updated_at, now());

    let events = store.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action.name, actions::CREATE_TIMESHEET);
    assert_eq!(events[0].before, None);
    assert_eq!(events[0].after, TimesheetStatus::Draft);
}

#[test]
fn test_upsert_replaces_entire_row_set() {
    let mut store: MemoryStore = seeded_store();
    let config: WorkflowConfig = WorkflowConfig::default();

    upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(week(2025, 32), vec![row("A", 800), row("B", 100)], None),
        now(),
    )
    .unwrap();

    let updated: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(week(2025, 32), vec![row("C", 400)], None),
        later(),
    )
    .unwrap();

    assert_eq!(updated.rows.len(), 1);
    assert_eq!(updated.rows[0].project_or_task, "C");
    assert_eq!(updated.created_at, now());
    assert_eq!(updated.updated_at, later());
    assert_eq!(store.timesheet_count(), 1);
    assert_eq!(store.events()[1].action.name, actions::UPDATE_TIMESHEET);
}

#[test]
fn test_upsert_is_idempotent() {
    let mut store: MemoryStore = seeded_store();
    let config: WorkflowConfig = WorkflowConfig::default();
    let request = snapshot(
        week(2025, 32),
        vec![row("A", 800), row("B", 250)],
        Some(TimesheetStatus::Draft),
    );

    let first: Timesheet =
        upsert_mine(&mut store, &worker(), &config, request.clone(), now()).unwrap();
    let second: Timesheet = upsert_mine(&mut store, &worker(), &config, request, now()).unwrap();

    assert_eq!(first.timesheet_id, second.timesheet_id);
    assert_eq!(first.status, second.status);
    assert_eq!(second.rows.len(), 2);
    for (a, b) in first.rows.iter().zip(second.rows.iter()) {
        assert_eq!(
            (&a.project_or_task, &a.notes, a.hours),
            (&b.project_or_task, &b.notes, b.hours)
        );
    }
    assert_eq!(store.timesheet_count(), 1);
}

#[test]
fn test_upsert_applies_requested_status() {
    let mut store: MemoryStore = seeded_store();

    let timesheet: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &WorkflowConfig::default(),
        snapshot(
            week(2025, 32),
            vec![row("A", 800)],
            Some(TimesheetStatus::Submitted),
        ),
        now(),
    )
    .unwrap();

    assert_eq!(timesheet.status, TimesheetStatus::Submitted);
}

#[test]
fn test_owner_cannot_request_review_outcome() {
    let mut store: MemoryStore = seeded_store();

    for status in [TimesheetStatus::Approved, TimesheetStatus::Declined] {
        let result = upsert_mine(
            &mut store,
            &worker(),
            &WorkflowConfig::default(),
            snapshot(week(2025, 32), vec![row("A", 800)], Some(status)),
            now(),
        );
        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }
    assert_eq!(store.timesheet_count(), 0);
    assert!(store.events().is_empty());
}

#[test]
fn test_upsert_on_approved_is_rejected_and_unchanged() {
    let mut store: MemoryStore = seeded_store();
    let config: WorkflowConfig = WorkflowConfig::default();
    let created: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(week(2025, 32), vec![row("A", 800)], None),
        now(),
    )
    .unwrap();
    let id: i64 = created.timesheet_id.unwrap();
    admin_override(&mut store, &admin(), id, TimesheetStatus::Approved, now()).unwrap();
    let events_before: usize = store.events().len();

    let result = upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(week(2025, 32), vec![row("Z", 100)], Some(TimesheetStatus::Draft)),
        later(),
    );

    assert_eq!(
        result,
        Err(CoreError::InvalidState(String::from(
            "Cannot edit approved timesheet"
        )))
    );
    let stored: Timesheet = store.find_by_id(id).unwrap().unwrap();
    assert_eq!(stored.status, TimesheetStatus::Approved);
    assert_eq!(stored.rows[0].project_or_task, "A");
    assert_eq!(store.events().len(), events_before);
}

#[test]
fn test_submitted_stays_editable_by_default() {
    let mut store: MemoryStore = seeded_store();
    let config: WorkflowConfig = WorkflowConfig::default();
    upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(
            week(2025, 32),
            vec![row("A", 800)],
            Some(TimesheetStatus::Submitted),
        ),
        now(),
    )
    .unwrap();

    let edited: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(week(2025, 32), vec![row("B", 700)], None),
        later(),
    )
    .unwrap();

    assert_eq!(edited.status, TimesheetStatus::Submitted);
    assert_eq!(edited.rows[0].project_or_task, "B");
}

#[test]
fn test_lock_submitted_policy_blocks_edits() {
    let mut store: MemoryStore = seeded_store();
    let config: WorkflowConfig = WorkflowConfig::new(EditPolicy::LockSubmittedAndApproved);
    upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(
            week(2025, 32),
            vec![row("A", 800)],
            Some(TimesheetStatus::Submitted),
        ),
        now(),
    )
    .unwrap();

    let result = upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(week(2025, 32), vec![row("B", 700)], None),
        later(),
    );

    assert_eq!(
        result,
        Err(CoreError::InvalidState(String::from(
            "Cannot edit submitted timesheet"
        )))
    );
}

#[test]
fn test_declined_keeps_status_unless_requested() {
    let mut store: MemoryStore = seeded_store();
    let config: WorkflowConfig = WorkflowConfig::default();
    let created: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(week(2025, 32), vec![row("A", 800)], None),
        now(),
    )
    .unwrap();
    admin_override(
        &mut store,
        &admin(),
        created.timesheet_id.unwrap(),
        TimesheetStatus::Declined,
        now(),
    )
    .unwrap();

    let edited: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(week(2025, 32), vec![row("A", 750)], None),
        later(),
    )
    .unwrap();
    assert_eq!(edited.status, TimesheetStatus::Declined);

    let resubmitted: Timesheet = upsert_mine(
        &mut store,
        &worker(),
        &config,
        snapshot(
            week(2025, 32),
            vec![row("A", 750)],
            Some(TimesheetStatus::Submitted),
        ),
        later(),
    )
    .unwrap();
    assert_eq!(resubmitted.status, TimesheetStatus::Submitted);
}

#[test]
fn test_list_mine_is_scoped_and_ordered() {
    let mut store: MemoryStore = seeded_store();
    let config: WorkflowConfig = WorkflowConfig::default();
    for (y, w) in [(2024, 52), (2025, 2), (2025, 10)] {
        upsert_mine(
            &mut store,
            &worker(),
            &config,
            snapshot(week(y, w), vec![row("A", 800)], None),
            now(),
        )
        .unwrap();
    }
    upsert_mine(
        &mut store,
        &admin(),
        &config,
        snapshot(week(2025, 10), vec![row("Admin", 100)], None),
        now(),
    )
    .unwrap();

    let mine: Vec<Timesheet> = list_mine(&mut store, &worker(), None, None).unwrap();
    let weeks: Vec<(u16, u8)> = mine
        .iter()
        .map(|t| (t.week.year(), t.week.week()))
        .collect();
    assert_eq!(weeks, vec![(2025, 10), (2025, 2), (2024, 52)]);

    let filtered: Vec<Timesheet> = list_mine(&mut store, &worker(), Some(2025), None).unwrap();
    assert_eq!(filtered.len(), 2);

    let exact: Vec<Timesheet> = list_mine(&mut store, &worker(), Some(2025), Some(2)).unwrap();
    assert_eq!(exact.len(), 1);
}
