//! Reordering: computes new column assignments and dense orderings when an
//! issue moves, as a minimal batch of positional updates.
//!
//! The batch is computed against a snapshot before anything is persisted,
//! so the controller can apply it atomically to local state and hand the
//! same entries to the remote store.

use crate::board::columns::column_issues;
use crate::board::review;
use crate::error::{BoardError, Result};
use crate::remote::OrderingEntry;
use crate::types::{Issue, IssueId, StatusId};

/// Where a dragged issue lands in the destination column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    /// Insert before the issue currently at this index (clamped to the
    /// column length).
    At(usize),
    End,
}

/// The computed effect of a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    /// Nothing changes and nothing must be persisted.
    Noop,
    Move {
        issue: IssueId,
        /// Positional updates for every issue whose column or index
        /// changed, covering both affected columns.
        entries: Vec<OrderingEntry>,
        /// The moved issue carried review flags that the column change
        /// discards.
        clear_review: bool,
        /// Explicit status changes also pull the issue off the roadmap.
        reset_bucket: bool,
    },
}

/// Plan a drag-and-drop move of `id` onto `dest` at `drop`.
///
/// Dropping an issue onto its own column is a no-op, including a self-drop
/// at a different index: board drags only change columns, they do not
/// reorder within one.
pub fn move_issue(
    issues: &[Issue],
    id: &IssueId,
    dest: &StatusId,
    drop: DropPosition,
) -> Result<MovePlan> {
    plan_move(issues, id, dest, drop, false)
}

/// Plan an explicit status change (selection control rather than a drag).
///
/// The issue is always appended at the end of the destination column, and
/// its roadmap bucket is reset: changing status this way restarts the
/// pipeline for the issue.
pub fn change_status(issues: &[Issue], id: &IssueId, dest: &StatusId) -> Result<MovePlan> {
    plan_move(issues, id, dest, DropPosition::End, true)
}

fn plan_move(
    issues: &[Issue],
    id: &IssueId,
    dest: &StatusId,
    drop: DropPosition,
    explicit: bool,
) -> Result<MovePlan> {
    let moving = issues
        .iter()
        .find(|i| &i.id == id)
        .ok_or_else(|| BoardError::IssueNotFound(id.clone()))?;

    if moving.status_id.as_ref() == Some(dest) {
        return Ok(MovePlan::Noop);
    }

    let mut entries = Vec::new();

    // Close the gap in the source column. Unassigned issues are in no
    // column, so there is nothing to renumber.
    if let Some(src) = &moving.status_id {
        let remaining: Vec<&Issue> = column_issues(issues, src)
            .into_iter()
            .filter(|i| i.id != moving.id)
            .collect();
        for (idx, issue) in remaining.iter().enumerate() {
            if issue.ordering != idx as u32 {
                entries.push(OrderingEntry {
                    id: issue.id.clone(),
                    status_id: src.clone(),
                    ordering: idx as u32,
                });
            }
        }
    }

    // Insert into the destination and renumber it.
    let mut dest_col = column_issues(issues, dest);
    let at = match drop {
        DropPosition::At(i) => i.min(dest_col.len()),
        DropPosition::End => dest_col.len(),
    };
    dest_col.insert(at, moving);
    for (idx, issue) in dest_col.iter().enumerate() {
        if issue.id == moving.id || issue.ordering != idx as u32 {
            entries.push(OrderingEntry {
                id: issue.id.clone(),
                status_id: dest.clone(),
                ordering: idx as u32,
            });
        }
    }

    Ok(MovePlan::Move {
        issue: moving.id.clone(),
        entries,
        clear_review: moving.ready_for_review || moving.review_rejected,
        reset_bucket: explicit && moving.roadmap_bucket.is_some(),
    })
}

/// Next ordering for an issue appended to `status`.
pub fn append_ordering(issues: &[Issue], status: &StatusId) -> u32 {
    column_issues(issues, status)
        .iter()
        .map(|i| i.ordering)
        .max()
        .map_or(0, |m| m + 1)
}

/// Entries that restore density in one column, for issues whose ordering
/// drifted (after a deletion, or on corrupted input).
pub fn renumber_column(issues: &[Issue], status: &StatusId) -> Vec<OrderingEntry> {
    column_issues(issues, status)
        .iter()
        .enumerate()
        .filter(|(idx, issue)| issue.ordering != *idx as u32)
        .map(|(idx, issue)| OrderingEntry {
            id: issue.id.clone(),
            status_id: status.clone(),
            ordering: idx as u32,
        })
        .collect()
}

/// Apply a move plan to a local issue set: positions, review flags, and
/// roadmap bucket. Mirrors what the persisted calls will do remotely.
pub fn apply_plan(issues: &mut [Issue], plan: &MovePlan) {
    let MovePlan::Move {
        issue: moved_id,
        entries,
        clear_review,
        reset_bucket,
    } = plan
    else {
        return;
    };
    for entry in entries {
        if let Some(issue) = issues.iter_mut().find(|i| i.id == entry.id) {
            issue.status_id = Some(entry.status_id.clone());
            issue.ordering = entry.ordering;
        }
    }
    if let Some(moved) = issues.iter_mut().find(|i| &i.id == moved_id) {
        if *clear_review {
            review::clear_review(moved);
        }
        if *reset_bucket {
            moved.roadmap_bucket = None;
        }
    }
}
