//! Outfit recommendation engine
//!
//! Combines style-tag, weather, occasion and location signals into one
//! explainable ranking, with a recency fallback for users who have not set
//! up a style profile yet.

mod engine;
mod scoring;
mod types;

pub use engine::RecommendationEngine;
pub use scoring::{CompatibilityScorer, ScoringWeights};
pub use types::*;

/// Default composite weights
pub const DEFAULT_WEIGHTS: ScoringWeights =
    ScoringWeights { style: 0.30, weather: 0.25, occasion: 0.15, location: 0.25 };

/// Score used whenever a signal has nothing to go on
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Recommendations returned when the caller does not ask for a count
pub const DEFAULT_LIMIT: usize = 5;

/// Reason strings kept per recommendation
pub const DEFAULT_MAX_REASONS: usize = 3;

/// Pairing suggestions synthesized around one anchor item
pub const MAX_PAIRINGS: usize = 3;
