//! Builders for creating test issues and board fixtures without a backend.

// Not every test binary uses every builder method.
#![allow(dead_code)]

use boardkit::types::{
    BucketId, Issue, IssueId, Owner, Priority, RoadmapBucket, Status, StatusId, UserId,
};
use jiff::civil::Date;

/// Builder for creating test issues
pub struct IssueBuilder {
    issue: Issue,
}

impl IssueBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            issue: Issue::new(IssueId::new(id), format!("Test issue {id}")),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.issue.title = title.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.issue.status_id = Some(StatusId::new(status));
        self
    }

    pub fn ordering(mut self, ordering: u32) -> Self {
        self.issue.ordering = ordering;
        self
    }

    pub fn owner(mut self, id: &str, name: &str) -> Self {
        self.issue.owner_id = Some(UserId::new(id));
        self.issue.owner_name = Some(name.to_string());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.issue.priority = priority;
        self
    }

    pub fn deadline(mut self, date: Date) -> Self {
        self.issue.deadline_date = Some(date);
        self
    }

    pub fn bucket(mut self, bucket: &str) -> Self {
        self.issue.roadmap_bucket = Some(BucketId::new(bucket));
        self
    }

    pub fn ready_for_review(mut self) -> Self {
        self.issue.ready_for_review = true;
        self
    }

    pub fn review_rejected(mut self) -> Self {
        self.issue.ready_for_review = true;
        self.issue.review_rejected = true;
        self
    }

    pub fn build(self) -> Issue {
        self.issue
    }
}

pub fn mock_status(id: &str, name: &str) -> Status {
    Status::new(id, name)
}

/// The standard three-column board used by most tests.
pub fn mock_statuses() -> Vec<Status> {
    vec![
        mock_status("s-todo", "To Do"),
        mock_status("s-wip", "In Progress"),
        mock_status("s-done", "Done"),
    ]
}

pub fn mock_bucket(id: &str, name: &str, sort_order: i64) -> RoadmapBucket {
    RoadmapBucket {
        id: BucketId::new(id),
        name: name.to_string(),
        sort_order,
    }
}

pub fn mock_owner(id: &str, name: &str) -> Owner {
    Owner {
        id: UserId::new(id),
        name: name.to_string(),
    }
}
