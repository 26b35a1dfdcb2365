//! Shared test support: mock data builders and an in-memory issue store.

pub mod mock_data;
pub mod mock_store;

pub use mock_data::{IssueBuilder, mock_bucket, mock_owner, mock_status, mock_statuses};
pub use mock_store::MockStore;
