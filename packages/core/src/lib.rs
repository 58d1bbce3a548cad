// ABOUTME: Core types, money arithmetic, and utilities for the Skyz proposal service
// ABOUTME: Foundational package shared by the catalog, engine, storage, and API packages

pub mod constants;
pub mod money;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use money::Money;
pub use types::{
    Category, NewProposal, PackageRecommendation, ProposalPackages, ProposalRecord,
    ProposalStatus, Recommendation, Savings, Timeline,
};

// Re-export constants
pub use constants::{default_database_path, skz_dir, PROPOSAL_VALIDITY_DAYS};

// Re-export utilities
pub use utils::{
    format_long_date, format_short_date, generate_proposal_id, generate_proposal_number,
    html_escape, valid_until,
};

// Re-export validation
pub use validation::{is_valid_email, truncate, ValidationError};
