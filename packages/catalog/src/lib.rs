// ABOUTME: Immutable service catalog and intake reference data
// ABOUTME: Built once at startup and shared by reference with the engine and projectors

pub mod budgets;
pub mod challenges;
pub mod company;
pub mod intake;
pub mod services;
mod standard;

pub use budgets::BudgetBracket;
pub use challenges::{challenge_label, complementary_services, Challenge};
pub use company::{CompanyProfile, Differentiator, Term};
pub use intake::{ChoiceOption, DELIVERY_METHODS, HAS_BRANDING_CHOICES, MEETING_CHOICES, SEGMENTS};
pub use services::{ServiceCatalog, ServiceCatalogEntry, ServiceOption};
