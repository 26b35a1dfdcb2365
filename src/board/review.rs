//! Review workflow: a small state machine layered on an issue's status and
//! its two review flags.
//!
//! The transition functions are total and only apply their effect; whether
//! a transition is currently legal for a given actor is a separate derived
//! check. The command dispatcher in [`crate::controller`] is the layer
//! that enforces the checks before calling a transition.
//!
//! Flag invariant: `review_rejected` implies `ready_for_review`.

use crate::types::{Issue, Status, UserId};

/// Whether the issue sits in a closed status with no pending review state.
/// Such issues are finished; there is nothing left to request review for.
pub fn is_closed_and_clean(issue: &Issue, statuses: &[Status]) -> bool {
    let closed = issue
        .status_id
        .as_ref()
        .and_then(|id| statuses.iter().find(|s| &s.id == id))
        .is_some_and(Status::is_closed);
    closed && !issue.ready_for_review && !issue.review_rejected
}

/// Only the owner may request review, and not on a finished issue. A
/// rejected review is re-requested through the same action.
pub fn can_request_review(issue: &Issue, acting_user: &UserId, statuses: &[Status]) -> bool {
    issue.is_owned_by(acting_user) && !is_closed_and_clean(issue, statuses)
}

/// Rejection needs write access and a review that is pending and not
/// already rejected.
pub fn can_reject_review(issue: &Issue, can_write: bool) -> bool {
    can_write && issue.ready_for_review && !issue.review_rejected
}

/// Mark the issue ready for review, clearing any earlier rejection.
pub fn request_review(issue: &mut Issue) {
    issue.ready_for_review = true;
    issue.review_rejected = false;
}

/// Reject a pending review. The ready flag stays set; the owner clears the
/// rejection by requesting review again.
pub fn reject_review(issue: &mut Issue) {
    issue.review_rejected = true;
}

/// Drop all review state. Invoked whenever an issue changes column: review
/// status is meaningless once work has left the workflow that produced it.
pub fn clear_review(issue: &mut Issue) {
    issue.ready_for_review = false;
    issue.review_rejected = false;
}
