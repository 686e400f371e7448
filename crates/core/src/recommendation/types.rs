//! Request and result types for the recommendation engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::outfit::Outfit;
use crate::domain::preferences::PreferenceProfile;
use crate::domain::weather::WeatherContext;
use crate::learning::LearnedWeights;
use crate::location::LocationPreference;

/// Everything the ranker may use besides the outfits themselves.
///
/// Every field except `now` is optional and each missing piece degrades to
/// a neutral score rather than an error.
#[derive(Debug, Clone)]
pub struct RecommendationRequest<'a> {
    pub profile: Option<&'a PreferenceProfile>,
    pub learned: Option<&'a LearnedWeights>,
    pub weather: Option<&'a WeatherContext>,
    pub occasion: Option<&'a str>,
    pub location: Option<&'a str>,
    pub region: Option<&'a str>,
    pub known_locations: Option<&'a [LocationPreference]>,
    pub limit: usize,
    pub now: DateTime<Utc>,
}

impl<'a> RecommendationRequest<'a> {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            profile: None,
            learned: None,
            weather: None,
            occasion: None,
            location: None,
            region: None,
            known_locations: None,
            limit: super::DEFAULT_LIMIT,
            now,
        }
    }

    pub fn with_profile(mut self, profile: Option<&'a PreferenceProfile>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_learned_weights(mut self, learned: &'a LearnedWeights) -> Self {
        self.learned = Some(learned);
        self
    }

    pub fn with_weather(mut self, weather: Option<&'a WeatherContext>) -> Self {
        self.weather = weather;
        self
    }

    /// Blank occasions are treated as no occasion.
    pub fn with_occasion(mut self, occasion: Option<&'a str>) -> Self {
        self.occasion = occasion.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn at_location(
        mut self,
        location: &'a str,
        region: &'a str,
        known_locations: &'a [LocationPreference],
    ) -> Self {
        self.location = Some(location);
        self.region = Some(region);
        self.known_locations = Some(known_locations);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Location scoring needs a location, a region and the stored history.
    pub(crate) fn location_context(&self) -> Option<(&'a str, &'a str, &'a [LocationPreference])> {
        match (self.location, self.region, self.known_locations) {
            (Some(location), Some(region), Some(known)) => Some((location, region, known)),
            _ => None,
        }
    }
}

/// An outfit with its ranking score and explanation. The outfit itself is
/// never modified by scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredOutfit {
    pub outfit: Outfit,
    /// Composite score (0.0 - 1.0)
    pub score: f64,
    pub confidence: ConfidenceLevel,
    pub reasons: Vec<String>,
    /// Absent for recency-ordered results.
    pub components: Option<ComponentScores>,
}

impl ScoredOutfit {
    pub fn display_score(&self) -> String {
        self.confidence.display_percentage(self.score)
    }
}

/// Individual scoring components
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    /// Style-tag score after learned-confidence scaling (0.0 - 1.0)
    pub style: f64,
    pub weather: f64,
    /// Present only when an occasion was requested
    pub occasion: Option<f64>,
    /// Present only when location context was supplied
    pub location: Option<f64>,
}

/// Confidence level for a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// High confidence (score >= 0.80)
    High,
    /// Medium confidence (score 0.60 - 0.79)
    Medium,
    /// Low confidence (score below 0.60)
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.80 {
            ConfidenceLevel::High
        } else if score >= 0.60 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn display_percentage(&self, score: f64) -> String {
        format!("{:.0}% match", score * 100.0)
    }
}

/// "Why this outfit" breakdown for a single outfit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub score: f64,
    pub feedback: Vec<String>,
    pub improvements: Vec<String>,
}
