//! Board derivations and state machines: columns, filtering, the review
//! workflow, and reordering. Everything here is pure and operates on issue
//! snapshots; the controller owns the mutable store.

pub mod columns;
pub mod filter;
pub mod reorder;
pub mod review;

pub use columns::{Column, column_index, column_issues, position_in_column};
pub use filter::{DueRange, FilterContext, FilterSpec, SortKey, apply_filter};
pub use reorder::{
    DropPosition, MovePlan, append_ordering, apply_plan, change_status, move_issue,
    renumber_column,
};
