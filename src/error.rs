use thiserror::Error;

use crate::types::{BucketId, IssueId, StatusId};

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("issue '{0}' not found")]
    IssueNotFound(IssueId),

    #[error("status '{0}' not found")]
    StatusNotFound(StatusId),

    #[error("roadmap bucket '{0}' not found")]
    BucketNotFound(BucketId),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("issue title cannot be empty")]
    EmptyTitle,

    #[error("review flags change through the review commands")]
    ReviewFlagsNotEditable,

    #[error("write access required")]
    WriteDenied,

    #[error("only the issue owner may request review")]
    NotOwner,

    #[error("no review is awaiting a decision")]
    ReviewNotPending,

    #[error("issue is closed")]
    IssueClosed,

    #[error("store error: {0}")]
    Store(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
