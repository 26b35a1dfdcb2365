//! In-memory [`IssueStore`] double with failure injection.
//!
//! Clones share the same underlying data, so a test can keep a handle for
//! assertions and injection after moving a clone into the controller.

use std::sync::{Arc, Mutex};

use boardkit::error::{BoardError, Result};
use boardkit::remote::{IssueDraft, IssueStore, IssueUpdates, OrderingEntry};
use boardkit::types::{Issue, IssueId, Owner, RoadmapBucket, Status, UserId};

#[derive(Debug, Default)]
pub struct MockData {
    pub issues: Vec<Issue>,
    pub statuses: Vec<Status>,
    pub buckets: Vec<RoadmapBucket>,
    pub owners: Vec<Owner>,
    /// When set, the next mutating call fails once.
    pub fail_next: bool,
    pub next_id: u32,
    pub create_calls: usize,
    pub update_calls: usize,
    pub ordering_calls: usize,
    pub delete_calls: usize,
}

#[derive(Clone, Default)]
pub struct MockStore {
    data: Arc<Mutex<MockData>>,
}

impl MockStore {
    pub fn new(statuses: Vec<Status>, issues: Vec<Issue>) -> Self {
        let store = Self::default();
        {
            let mut data = store.lock();
            data.statuses = statuses;
            data.issues = issues;
            data.next_id = 1;
        }
        store
    }

    pub fn with_buckets(self, buckets: Vec<RoadmapBucket>) -> Self {
        self.lock().buckets = buckets;
        self
    }

    pub fn with_owners(self, owners: Vec<Owner>) -> Self {
        self.lock().owners = owners;
        self
    }

    /// Make the next mutating call fail.
    pub fn fail_next(&self) {
        self.lock().fail_next = true;
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.lock().issues.clone()
    }

    pub fn issue(&self, id: &str) -> Option<Issue> {
        self.lock()
            .issues
            .iter()
            .find(|i| i.id.as_str() == id)
            .cloned()
    }

    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.lock().update_calls
    }

    pub fn ordering_calls(&self) -> usize {
        self.lock().ordering_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.lock().delete_calls
    }

    /// Mutate the backing data directly, simulating a second session.
    pub fn mutate(&self, f: impl FnOnce(&mut MockData)) {
        f(&mut self.lock());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockData> {
        self.data.lock().expect("mock store lock poisoned")
    }

    fn take_failure(data: &mut MockData) -> Result<()> {
        if data.fail_next {
            data.fail_next = false;
            Err(BoardError::Store("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl IssueStore for MockStore {
    async fn list_statuses(&self) -> Result<Vec<Status>> {
        Ok(self.lock().statuses.clone())
    }

    async fn list_buckets(&self) -> Result<Vec<RoadmapBucket>> {
        Ok(self.lock().buckets.clone())
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        Ok(self.lock().issues.clone())
    }

    async fn list_owners(&self) -> Result<Vec<Owner>> {
        Ok(self.lock().owners.clone())
    }

    async fn create_issue(&self, draft: IssueDraft, _created_by: &UserId) -> Result<Issue> {
        let mut data = self.lock();
        data.create_calls += 1;
        Self::take_failure(&mut data)?;

        let id = IssueId::new(format!("srv-{}", data.next_id));
        data.next_id += 1;
        let issue = Issue {
            id,
            title: draft.title,
            description: draft.description,
            status_id: draft.status_id,
            priority: draft.priority,
            owner_id: draft.owner_id,
            owner_name: draft.owner_name,
            deadline_date: draft.deadline_date,
            roadmap_bucket: draft.roadmap_bucket,
            ready_for_review: false,
            review_rejected: false,
            ordering: draft.ordering,
        };
        data.issues.push(issue.clone());
        Ok(issue)
    }

    async fn update_issue(&self, id: &IssueId, updates: IssueUpdates) -> Result<Issue> {
        let mut data = self.lock();
        data.update_calls += 1;
        Self::take_failure(&mut data)?;

        let issue = data
            .issues
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| BoardError::IssueNotFound(id.clone()))?;
        updates.apply_to(issue);
        Ok(issue.clone())
    }

    async fn apply_ordering(&self, entries: &[OrderingEntry]) -> Result<()> {
        let mut data = self.lock();
        data.ordering_calls += 1;
        Self::take_failure(&mut data)?;

        for entry in entries {
            if let Some(issue) = data.issues.iter_mut().find(|i| i.id == entry.id) {
                issue.status_id = Some(entry.status_id.clone());
                issue.ordering = entry.ordering;
            }
        }
        Ok(())
    }

    async fn delete_issue(&self, id: &IssueId) -> Result<()> {
        let mut data = self.lock();
        data.delete_calls += 1;
        Self::take_failure(&mut data)?;

        let pos = data
            .issues
            .iter()
            .position(|i| &i.id == id)
            .ok_or_else(|| BoardError::IssueNotFound(id.clone()))?;
        data.issues.remove(pos);
        Ok(())
    }
}
