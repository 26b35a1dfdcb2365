//! Boundary to the persistence layer.
//!
//! The board core never talks to a transport directly; it goes through the
//! [`IssueStore`] trait, which a hosted-backend client (or the in-memory
//! test double) implements. All shapes here are wire-facing and serialize
//! with the backend's camelCase field names.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::Result;
use crate::types::{
    BucketId, Issue, IssueId, Owner, Priority, RoadmapBucket, Status, StatusId, UserId,
};

/// Fields for creating an issue. `status_id` and `ordering` are resolved by
/// the controller before the draft reaches the store (new issues land at the
/// end of the first column unless a column is given).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<StatusId>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<Date>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmap_bucket: Option<BucketId>,

    #[serde(default)]
    pub ordering: u32,
}

impl IssueDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial update to apply to an issue.
///
/// Outer `None` means "leave unchanged"; for nullable fields the inner
/// `Option` carries the new value, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Option<Owner>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<Option<Date>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap_bucket: Option<Option<BucketId>>,

    /// Written by the review and move flows; field edits may not touch the
    /// review flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_for_review: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_rejected: Option<bool>,
}

impl IssueUpdates {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.owner.is_none()
            && self.deadline_date.is_none()
            && self.roadmap_bucket.is_none()
            && self.ready_for_review.is_none()
            && self.review_rejected.is_none()
    }

    /// Update that clears both review flags (used when an issue changes
    /// column).
    pub fn clear_review() -> Self {
        Self {
            ready_for_review: Some(false),
            review_rejected: Some(false),
            ..Default::default()
        }
    }

    /// Apply this partial update to a local record. The store-side
    /// implementation of `update_issue` is expected to behave identically.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(title) = &self.title {
            issue.title = title.clone();
        }
        if let Some(description) = &self.description {
            issue.description = description.clone();
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(owner) = &self.owner {
            issue.set_owner(owner.clone());
        }
        if let Some(deadline) = self.deadline_date {
            issue.deadline_date = deadline;
        }
        if let Some(bucket) = &self.roadmap_bucket {
            issue.roadmap_bucket = bucket.clone();
        }
        if let Some(ready) = self.ready_for_review {
            issue.ready_for_review = ready;
        }
        if let Some(rejected) = self.review_rejected {
            issue.review_rejected = rejected;
        }
    }
}

/// One positional assignment in an ordering batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingEntry {
    pub id: IssueId,
    pub status_id: StatusId,
    pub ordering: u32,
}

/// Common interface to the remote issue store.
pub trait IssueStore: Send + Sync {
    /// Fetch all statuses; also the failure-recovery path.
    fn list_statuses(&self) -> impl Future<Output = Result<Vec<Status>>> + Send;

    /// Fetch all roadmap buckets.
    fn list_buckets(&self) -> impl Future<Output = Result<Vec<RoadmapBucket>>> + Send;

    /// Fetch all issues.
    fn list_issues(&self) -> impl Future<Output = Result<Vec<Issue>>> + Send;

    /// Fetch all known owners.
    fn list_owners(&self) -> impl Future<Output = Result<Vec<Owner>>> + Send;

    /// Create an issue and return the canonical stored record.
    fn create_issue(
        &self,
        draft: IssueDraft,
        created_by: &UserId,
    ) -> impl Future<Output = Result<Issue>> + Send;

    /// Partially update an issue and return the canonical stored record.
    fn update_issue(
        &self,
        id: &IssueId,
        updates: IssueUpdates,
    ) -> impl Future<Output = Result<Issue>> + Send;

    /// Bulk positional update, used exclusively for reordering output.
    fn apply_ordering(&self, entries: &[OrderingEntry]) -> impl Future<Output = Result<()>> + Send;

    /// Hard-delete an issue.
    fn delete_issue(&self, id: &IssueId) -> impl Future<Output = Result<()>> + Send;
}
