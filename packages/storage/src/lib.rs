// ABOUTME: SQLite persistence for proposals: pool setup, migrations, and the proposal store
// ABOUTME: The only shared mutable state of the service lives behind this crate

pub mod db;
pub mod error;
pub mod listing;
pub mod proposals;

pub use db::{connect, connect_in_memory, connect_url};
pub use error::{StorageError, StorageResult};
pub use listing::{ListQuery, ProposalSummary, SortField, SortOrder, StatusCounts};
pub use proposals::{ProposalStorage, ViewOutcome};
