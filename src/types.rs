use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

id_type!(
    /// Opaque identifier assigned to an issue by the backing store.
    IssueId
);
id_type!(
    /// Identifier of a board column (status).
    StatusId
);
id_type!(
    /// Identifier of a roadmap bucket.
    BucketId
);
id_type!(
    /// Identifier of a user (issue owner or acting user).
    UserId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    /// Numeric rank for sorting (highest urgency first).
    pub fn as_rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Normal => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Normal => write!(f, "normal"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            _ => Err(BoardError::InvalidPriority(s.to_string())),
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["high", "normal", "low"];

/// A unit of work on the board.
///
/// `ordering` is a dense 0-based index within the set of issues sharing
/// the same `status_id`. Issues with no `status_id` are unassigned and
/// appear in no column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,

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
    pub ready_for_review: bool,

    #[serde(default)]
    pub review_rejected: bool,

    #[serde(default)]
    pub ordering: u32,
}

impl Issue {
    /// Create a bare issue with defaults for everything but id and title.
    pub fn new(id: IssueId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status_id: None,
            priority: Priority::default(),
            owner_id: None,
            owner_name: None,
            deadline_date: None,
            roadmap_bucket: None,
            ready_for_review: false,
            review_rejected: false,
            ordering: 0,
        }
    }

    /// Set or clear the owner, keeping id and name in lockstep.
    pub fn set_owner(&mut self, owner: Option<Owner>) {
        match owner {
            Some(o) => {
                self.owner_id = Some(o.id);
                self.owner_name = Some(o.name);
            }
            None => {
                self.owner_id = None;
                self.owner_name = None;
            }
        }
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner_id.as_ref() == Some(user)
    }
}

/// A named board column, loaded once per session from the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: StatusId,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this status represents completed work. Records that predate
    /// the flag carry `None` and fall back to a name heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
}

impl Status {
    pub fn new(id: impl Into<StatusId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            closed: None,
        }
    }

    /// Terminal statuses auto-clear pending review state.
    pub fn is_closed(&self) -> bool {
        self.closed
            .unwrap_or_else(|| self.name.to_lowercase().contains("done"))
    }
}

/// A time-horizon grouping ("Now", "Next", "Later"), independent of status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapBucket {
    pub id: BucketId,
    pub name: String,
    #[serde(default)]
    pub sort_order: i64,
}

/// Denormalized identity reference; read-only from the board's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: UserId,
    pub name: String,
}
