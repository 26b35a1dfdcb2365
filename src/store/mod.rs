//! In-memory work-item store.
//!
//! Single source of truth for the board: every derivation (columns,
//! filters) reads a snapshot of it, and only the controller writes to it.

use crate::remote::OrderingEntry;
use crate::types::{Issue, IssueId, Owner, RoadmapBucket, Status, StatusId};

#[derive(Debug, Clone, Default)]
pub struct WorkItemStore {
    issues: Vec<Issue>,
    statuses: Vec<Status>,
    buckets: Vec<RoadmapBucket>,
    owners: Vec<Owner>,
}

impl WorkItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    /// Buckets in display order.
    pub fn buckets(&self) -> &[RoadmapBucket] {
        &self.buckets
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub fn issue(&self, id: &IssueId) -> Option<&Issue> {
        self.issues.iter().find(|i| &i.id == id)
    }

    pub fn issue_mut(&mut self, id: &IssueId) -> Option<&mut Issue> {
        self.issues.iter_mut().find(|i| &i.id == id)
    }

    pub fn status(&self, id: &StatusId) -> Option<&Status> {
        self.statuses.iter().find(|s| &s.id == id)
    }

    /// Default column for newly created issues.
    pub fn first_status(&self) -> Option<&Status> {
        self.statuses.first()
    }

    /// Replace the full contents, used at startup and on reconciliation.
    pub fn replace_all(
        &mut self,
        issues: Vec<Issue>,
        statuses: Vec<Status>,
        mut buckets: Vec<RoadmapBucket>,
        owners: Vec<Owner>,
    ) {
        buckets.sort_by_key(|b| b.sort_order);
        self.issues = issues;
        self.statuses = statuses;
        self.buckets = buckets;
        self.owners = owners;
    }

    /// Insert an issue, or replace the stored record with the same id.
    pub fn upsert_issue(&mut self, issue: Issue) {
        match self.issues.iter_mut().find(|i| i.id == issue.id) {
            Some(existing) => *existing = issue,
            None => self.issues.push(issue),
        }
    }

    pub fn remove_issue(&mut self, id: &IssueId) -> Option<Issue> {
        let pos = self.issues.iter().position(|i| &i.id == id)?;
        Some(self.issues.remove(pos))
    }

    /// Apply a positional batch: each entry rewrites the target issue's
    /// column and ordering. Entries for unknown issues are ignored.
    pub fn apply_ordering(&mut self, entries: &[OrderingEntry]) {
        for entry in entries {
            if let Some(issue) = self.issue_mut(&entry.id) {
                issue.status_id = Some(entry.status_id.clone());
                issue.ordering = entry.ordering;
            }
        }
    }
}
