pub mod config;
pub mod domain;
pub mod errors;
pub mod learning;
pub mod location;
pub mod recommendation;
pub mod session;

pub use config::{AppConfig, ConfigError, LoadOptions};
pub use domain::feedback::{FeedbackContext, FeedbackEvent, FeedbackKind};
pub use domain::item::ClothingItem;
pub use domain::outfit::Outfit;
pub use domain::preferences::{
    ActivityLevel, BudgetRange, PersonalizedSuggestions, PreferenceProfile, WeatherSensitivity,
};
pub use domain::season::Season;
pub use domain::tags::TagSet;
pub use domain::weather::{WeatherContext, WeatherDescriptor, WeatherGuidance};
pub use errors::{ApplicationError, DomainError};
pub use learning::{
    accuracy, FeedbackLearner, LearnedPreferenceWeight, LearnedWeights, PreferenceDimension,
    StyleEvolutionEntry, StylePersonality,
};
pub use location::{
    Climate, ClimateModel, ClimateThresholds, LocationPreference, LocationRecommendation,
    SeasonalPattern,
};
pub use recommendation::{
    CompatibilityReport, CompatibilityScorer, ComponentScores, ConfidenceLevel,
    RecommendationEngine, RecommendationRequest, ScoredOutfit, ScoringWeights,
};
pub use session::{PreferenceState, SessionRegistry, WardrobeSession};
