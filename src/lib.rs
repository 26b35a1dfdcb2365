//! boardkit: the state core of a kanban task board.
//!
//! Work items live in a [`store::WorkItemStore`]; columns and filtered
//! views are pure derivations over snapshots of it; the review workflow
//! and reordering algorithm compute state transitions; and the
//! [`controller::BoardController`] applies them optimistically against a
//! remote [`remote::IssueStore`], reloading everything when a persistence
//! call fails.

pub mod board;
pub mod controller;
pub mod error;
pub mod remote;
pub mod store;
pub mod types;

pub use board::{
    Column, DropPosition, DueRange, FilterContext, FilterSpec, MovePlan, SortKey, apply_filter,
    column_index,
};
pub use controller::{BoardCommand, BoardController, ControllerPhase};
pub use error::{BoardError, Result};
pub use remote::{IssueDraft, IssueStore, IssueUpdates, OrderingEntry};
pub use store::WorkItemStore;
pub use types::{
    BucketId, Issue, IssueId, Owner, Priority, RoadmapBucket, Status, StatusId, UserId,
};
