//! Scoring functions for outfit recommendations
//!
//! Every scorer returns a value in [0, 1]. Bonuses are additive on top of a
//! base and clamped at 1.0 rather than renormalized.

use chrono::{DateTime, Utc};

use super::types::ComponentScores;
use super::NEUTRAL_SCORE;
use crate::domain::item::ClothingItem;
use crate::domain::preferences::{PreferenceProfile, WeatherSensitivity};
use crate::domain::season::Season;
use crate::domain::weather::WeatherContext;
use crate::learning::LearnedWeights;
use crate::location::{find_location, Climate, LocationPreference};

const WARM_LAYERS: &[&str] = &["Outerwear", "Sweaters"];
const LIGHT_LAYERS: &[&str] = &["Tops", "T-shirts"];
const WATERPROOF: &[&str] = &["Outerwear", "Footwear"];
const COLD_CLIMATE_LAYERS: &[&str] = &["Outerwear", "Sweaters", "Thermal"];
const HOT_CLIMATE_LAYERS: &[&str] = &["T-shirts", "Tank Tops", "Shorts"];

/// Weights for scoring components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Style-tag component (default: 0.30)
    pub style: f64,
    /// Weather component (default: 0.25)
    pub weather: f64,
    /// Occasion component, used only when an occasion is requested (default: 0.15)
    pub occasion: f64,
    /// Location component, used only with location context (default: 0.25)
    pub location: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Expected item categories (or tags) for an occasion. Unknown occasions
/// expect nothing.
pub fn expected_for_occasion(occasion: &str) -> &'static [&'static str] {
    match occasion.trim().to_lowercase().as_str() {
        "work" | "business" => &["Formal", "Business"],
        "casual" => &["Casual", "Streetwear"],
        "formal" => &["Formal", "Business"],
        "party" => &["Formal", "Dresses"],
        "sport" => &["Athletic", "Sportswear"],
        _ => &[],
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    weights: ScoringWeights,
}

impl CompatibilityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Style-tag score of a single item against a profile. Ranking and
    /// pairing go through [`Self::learned_style_score`], which scales this by
    /// learned confidence.
    pub fn style_tag_score(&self, item: &ClothingItem, profile: &PreferenceProfile) -> f64 {
        let mut score: f64 = NEUTRAL_SCORE;

        if profile.matches_style(&item.tags) {
            score += 0.3;
        }
        if profile.matches_fit(&item.tags) {
            score += 0.2;
        }
        if profile.matches_activity(&item.tags) {
            score += 0.15;
        }
        if profile.matches_sustainability(&item.tags) {
            score += 0.1;
        }

        score.min(1.0)
    }

    /// Style-tag score scaled by what feedback has taught about the item's
    /// category, color and brand. Unobserved items keep the raw score.
    pub fn learned_style_score(
        &self,
        item: &ClothingItem,
        profile: &PreferenceProfile,
        learned: Option<&LearnedWeights>,
    ) -> f64 {
        let base = self.style_tag_score(item, profile);
        match learned.and_then(|weights| weights.item_confidence(item)) {
            Some(confidence) => (base * (0.5 + confidence)).clamp(0.0, 1.0),
            None => base,
        }
    }

    /// Season-match score of one item for the current weather.
    pub fn season_weather_score(
        &self,
        item: &ClothingItem,
        weather: Option<&WeatherContext>,
        profile: Option<&PreferenceProfile>,
    ) -> f64 {
        let Some(weather) = weather else {
            return NEUTRAL_SCORE;
        };

        let suitable = weather.descriptor().appropriate_seasons();
        let matched = item.seasons.iter().any(|season| *season == Season::AllSeasons || suitable.contains(season));
        let sensitivity = profile.map(|profile| profile.weather_sensitivity).unwrap_or_default();

        match (sensitivity, matched) {
            (WeatherSensitivity::VerySensitive, true) => 0.9,
            (WeatherSensitivity::VerySensitive, false) => 0.1,
            (WeatherSensitivity::NotSensitive, true) => 0.8,
            (WeatherSensitivity::NotSensitive, false) => 0.6,
            (_, true) => 0.8,
            (_, false) => 0.3,
        }
    }

    /// Temperature and precipitation fit of a whole outfit.
    pub fn outfit_weather_score(&self, items: &[&ClothingItem], weather: Option<&WeatherContext>) -> f64 {
        let Some(weather) = weather else {
            return NEUTRAL_SCORE;
        };

        let has = |categories: &[&str]| items.iter().any(|item| item.in_any_category(categories));
        let t = weather.temperature;
        let mut score: f64 = NEUTRAL_SCORE;

        if t < 15.0 && has(WARM_LAYERS) {
            score += 0.3;
        }
        if t > 25.0 && has(LIGHT_LAYERS) {
            score += 0.3;
        }
        if (15.0..=25.0).contains(&t) {
            score += 0.2;
        }
        if weather.is_wet() && has(WATERPROOF) {
            score += 0.2;
        }

        score.min(1.0)
    }

    /// 0.8 when any item's category or tags fit the occasion, else 0.3.
    pub fn occasion_score(&self, items: &[&ClothingItem], occasion: &str) -> f64 {
        let expected = expected_for_occasion(occasion);
        let fits = items
            .iter()
            .any(|item| item.in_any_category(expected) || item.tags.contains_any(expected));

        if fits {
            0.8
        } else {
            0.3
        }
    }

    pub fn location_score(
        &self,
        items: &[&ClothingItem],
        location: &str,
        region: &str,
        known: &[LocationPreference],
        now: DateTime<Utc>,
    ) -> f64 {
        let Some(preference) = find_location(known, location, region) else {
            return NEUTRAL_SCORE;
        };
        let Some(pattern) = preference.pattern_for(Season::current(now)) else {
            return NEUTRAL_SCORE;
        };

        let mut score: f64 = NEUTRAL_SCORE;
        if items.iter().any(|item| pattern.prefers_category(&item.category)) {
            score += 0.2;
        }
        if items.iter().any(|item| pattern.prefers_color(&item.color)) {
            score += 0.2;
        }

        let climate_layers = match preference.climate {
            Climate::Cold => Some(COLD_CLIMATE_LAYERS),
            Climate::Hot => Some(HOT_CLIMATE_LAYERS),
            Climate::Temperate | Climate::Warm => None,
        };
        if let Some(layers) = climate_layers {
            if items.iter().any(|item| item.in_any_category(layers)) {
                score += 0.1;
            }
        }

        score.min(1.0)
    }

    /// Weighted composite over the components that were actually scored.
    /// Weights of absent components are left out of the normalization.
    pub fn calculate_total_score(&self, components: &ComponentScores) -> f64 {
        let mut total = components.style * self.weights.style + components.weather * self.weights.weather;
        let mut weight = self.weights.style + self.weights.weather;

        if let Some(occasion) = components.occasion {
            total += occasion * self.weights.occasion;
            weight += self.weights.occasion;
        }
        if let Some(location) = components.location {
            total += location * self.weights.location;
            weight += self.weights.location;
        }

        if weight > 0.0 {
            (total / weight).clamp(0.0, 1.0)
        } else {
            NEUTRAL_SCORE
        }
    }
}
