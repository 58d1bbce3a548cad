// ABOUTME: Package recommendation engine
// ABOUTME: Derives the recommended package, alternatives, and discounted combos from catalog data

mod alternatives;
mod combos;
mod engine;

pub use engine::{RecommendError, RecommendationEngine, RecommendationInput};
