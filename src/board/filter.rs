//! Filtering and sorting over issue snapshots.
//!
//! Pure functions: the engine never mutates its input and makes no
//! assumption about ordering density, so it serves both the board view
//! (which re-partitions the result by status) and the flat list view.

use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{Issue, Status, StatusId, UserId};

/// Deadline window restriction. Issues without a deadline fail every
/// variant except `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueRange {
    #[default]
    None,
    /// Deadline falls on the current day.
    Today,
    /// Deadline within the next seven days, inclusive.
    Week,
    /// Deadline strictly before the current day.
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    None,
    /// Ascending by deadline, issues without one last.
    DeadlineAsc,
    /// By status name rank: to do, in progress, done, everything else.
    StatusAsc,
}

/// Filter criteria; all active predicates are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Statuses to include; empty set means no status restriction.
    pub status_ids: BTreeSet<StatusId>,
    /// Exact-match restriction to one owner.
    pub owner_id: Option<UserId>,
    /// Restrict to issues owned by the acting user.
    pub assigned_only: bool,
    /// Restrict to issues flagged ready for review.
    pub ready_only: bool,
    pub due: DueRange,
    pub sort: SortKey,
}

/// Ambient inputs the filter needs but must not fetch itself, so that the
/// engine stays a pure function of its arguments.
#[derive(Debug, Clone)]
pub struct FilterContext {
    pub acting_user: Option<UserId>,
    pub today: Date,
}

/// Apply a filter spec to an issue snapshot, returning a new ordered list.
pub fn apply_filter(
    issues: &[Issue],
    spec: &FilterSpec,
    statuses: &[Status],
    ctx: &FilterContext,
) -> Vec<Issue> {
    let mut result: Vec<Issue> = issues
        .iter()
        .filter(|issue| matches_filter(issue, spec, ctx))
        .cloned()
        .collect();

    match spec.sort {
        SortKey::None => {}
        SortKey::DeadlineAsc => {
            // None sorts last; stable among equal deadlines.
            result.sort_by_key(|i| (i.deadline_date.is_none(), i.deadline_date));
        }
        SortKey::StatusAsc => {
            result.sort_by_key(|i| status_rank(i.status_id.as_ref(), statuses));
        }
    }

    result
}

fn matches_filter(issue: &Issue, spec: &FilterSpec, ctx: &FilterContext) -> bool {
    if !spec.status_ids.is_empty() {
        match &issue.status_id {
            Some(id) if spec.status_ids.contains(id) => {}
            _ => return false,
        }
    }

    if let Some(owner) = &spec.owner_id
        && issue.owner_id.as_ref() != Some(owner)
    {
        return false;
    }

    if spec.assigned_only {
        match &ctx.acting_user {
            Some(user) if issue.is_owned_by(user) => {}
            _ => return false,
        }
    }

    if spec.ready_only && !issue.ready_for_review {
        return false;
    }

    matches_due_range(issue.deadline_date, spec.due, ctx.today)
}

fn matches_due_range(deadline: Option<Date>, due: DueRange, today: Date) -> bool {
    let Some(deadline) = deadline else {
        return due == DueRange::None;
    };
    match due {
        DueRange::None => true,
        DueRange::Today => deadline == today,
        DueRange::Week => {
            let week_end = today.checked_add(7.days()).unwrap_or(today);
            deadline >= today && deadline <= week_end
        }
        DueRange::Overdue => deadline < today,
    }
}

/// Rank a status for the status-ascending sort, by column name.
fn status_rank(status_id: Option<&StatusId>, statuses: &[Status]) -> u32 {
    let Some(status) = status_id.and_then(|id| statuses.iter().find(|s| &s.id == id)) else {
        return 999;
    };
    let name = status.name.to_lowercase();
    if name.contains("to do") || name.contains("todo") {
        0
    } else if name.contains("progress") {
        1
    } else if name.contains("done") {
        2
    } else {
        999
    }
}
