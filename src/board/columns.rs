//! Column derivation: partition issues by status, ordered for display.

use crate::types::{Issue, IssueId, Status, StatusId};

/// One board column: the issues of a single status sorted by `ordering`.
#[derive(Debug, Clone)]
pub struct Column {
    pub status_id: StatusId,
    pub issues: Vec<Issue>,
}

impl Column {
    pub fn issue_ids(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.id.as_str()).collect()
    }
}

/// Derive the columns for a board from an issue snapshot.
///
/// Produces one column per known status, in status order. Issues whose
/// `status_id` is missing or refers to no known status appear in no column.
/// The sort is stable, so duplicate orderings (corrupted input) fall back
/// to the snapshot's own order instead of failing.
pub fn column_index(issues: &[Issue], statuses: &[Status]) -> Vec<Column> {
    statuses
        .iter()
        .map(|status| Column {
            status_id: status.id.clone(),
            issues: column_issues(issues, &status.id)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect()
}

/// The issues of one column as borrowed references, sorted by `ordering`.
pub fn column_issues<'a>(issues: &'a [Issue], status: &StatusId) -> Vec<&'a Issue> {
    let mut column: Vec<&Issue> = issues
        .iter()
        .filter(|i| i.status_id.as_ref() == Some(status))
        .collect();
    column.sort_by_key(|i| i.ordering);
    column
}

/// Position of an issue within its column, if it is in one.
pub fn position_in_column(issues: &[Issue], id: &IssueId) -> Option<usize> {
    let issue = issues.iter().find(|i| &i.id == id)?;
    let status = issue.status_id.as_ref()?;
    column_issues(issues, status)
        .iter()
        .position(|i| &i.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(id: &str, status: Option<&str>, ordering: u32) -> Issue {
        let mut issue = Issue::new(IssueId::new(id), format!("Issue {id}"));
        issue.status_id = status.map(StatusId::new);
        issue.ordering = ordering;
        issue
    }

    fn statuses() -> Vec<Status> {
        vec![
            Status::new("s-todo", "To Do"),
            Status::new("s-wip", "In Progress"),
            Status::new("s-done", "Done"),
        ]
    }

    #[test]
    fn test_partitions_by_status_sorted_by_ordering() {
        let issues = vec![
            make_issue("i-3", Some("s-todo"), 2),
            make_issue("i-1", Some("s-todo"), 0),
            make_issue("i-4", Some("s-wip"), 0),
            make_issue("i-2", Some("s-todo"), 1),
        ];
        let columns = column_index(&issues, &statuses());

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].issue_ids(), vec!["i-1", "i-2", "i-3"]);
        assert_eq!(columns[1].issue_ids(), vec!["i-4"]);
        assert!(columns[2].issues.is_empty());
    }

    #[test]
    fn test_dangling_status_excluded_from_every_column() {
        let issues = vec![
            make_issue("i-1", Some("s-todo"), 0),
            make_issue("i-2", Some("s-deleted"), 0),
            make_issue("i-3", None, 0),
        ];
        let columns = column_index(&issues, &statuses());

        let total: usize = columns.iter().map(|c| c.issues.len()).sum();
        assert_eq!(total, 1, "dangling and unassigned issues appear nowhere");
    }

    #[test]
    fn test_duplicate_orderings_fall_back_to_input_order() {
        // Corrupted input: two issues at ordering 1. Must not panic and
        // must keep snapshot order between the duplicates.
        let issues = vec![
            make_issue("i-a", Some("s-todo"), 1),
            make_issue("i-b", Some("s-todo"), 1),
            make_issue("i-c", Some("s-todo"), 0),
        ];
        let columns = column_index(&issues, &statuses());
        assert_eq!(columns[0].issue_ids(), vec!["i-c", "i-a", "i-b"]);
    }

    #[test]
    fn test_position_in_column() {
        let issues = vec![
            make_issue("i-1", Some("s-todo"), 0),
            make_issue("i-2", Some("s-todo"), 1),
            make_issue("i-3", None, 0),
        ];
        assert_eq!(position_in_column(&issues, &IssueId::new("i-2")), Some(1));
        assert_eq!(position_in_column(&issues, &IssueId::new("i-3")), None);
        assert_eq!(position_in_column(&issues, &IssueId::new("ghost")), None);
    }
}
