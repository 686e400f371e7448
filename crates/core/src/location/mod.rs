//! Location and climate model.
//!
//! A [`LocationPreference`] is either taken from stored history or
//! synthesized from the current weather reading (or, without one, from
//! region/country keywords). Synthesized preferences are returned to the
//! caller and never stored here.

mod patterns;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use patterns::seasonal_patterns;

use crate::domain::season::Season;
use crate::domain::tags::labels_match;
use crate::domain::weather::{WeatherContext, STRONG_WIND};

/// Confidence assigned to a location inferred without history.
pub const INFERRED_LOCATION_CONFIDENCE: f64 = 0.5;

const COLD_KEYWORDS: &[&str] = &["north", "northern", "arctic", "alaska", "canada", "scandinavia"];
const HOT_KEYWORDS: &[&str] = &["south", "southern", "tropical", "desert", "africa"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Climate {
    Cold,
    Temperate,
    Warm,
    Hot,
}

impl Climate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Climate::Cold => "Cold",
            Climate::Temperate => "Temperate",
            Climate::Warm => "Warm",
            Climate::Hot => "Hot",
        }
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bounds (exclusive, °C) for each climate band. Anything at or above
/// `warm_below` is Hot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateThresholds {
    pub cold_below: f64,
    pub temperate_below: f64,
    pub warm_below: f64,
}

impl Default for ClimateThresholds {
    fn default() -> Self {
        Self { cold_below: 10.0, temperate_below: 20.0, warm_below: 30.0 }
    }
}

impl ClimateThresholds {
    pub fn classify(&self, temperature: f64) -> Climate {
        if temperature < self.cold_below {
            Climate::Cold
        } else if temperature < self.temperate_below {
            Climate::Temperate
        } else if temperature < self.warm_below {
            Climate::Warm
        } else {
            Climate::Hot
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPattern {
    pub season: Season,
    pub preferred_categories: Vec<String>,
    pub preferred_colors: Vec<String>,
    pub average_temperature: f64,
    pub confidence: f64,
}

impl SeasonalPattern {
    pub fn prefers_category(&self, category: &str) -> bool {
        self.preferred_categories.iter().any(|preferred| labels_match(preferred, category))
    }

    pub fn prefers_color(&self, color: &str) -> bool {
        self.preferred_colors.iter().any(|preferred| labels_match(preferred, color))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPreference {
    pub location: String,
    pub region: String,
    pub country: String,
    pub climate: Climate,
    pub seasonal_patterns: Vec<SeasonalPattern>,
    pub confidence: f64,
    pub last_updated: DateTime<Utc>,
}

impl LocationPreference {
    /// Matches on either the location name or the region.
    pub fn matches(&self, location: &str, region: &str) -> bool {
        labels_match(&self.location, location) || labels_match(&self.region, region)
    }

    pub fn pattern_for(&self, season: Season) -> Option<&SeasonalPattern> {
        self.seasonal_patterns.iter().find(|pattern| pattern.season == season)
    }
}

pub fn find_location<'a>(
    known: &'a [LocationPreference],
    location: &str,
    region: &str,
) -> Option<&'a LocationPreference> {
    known.iter().find(|preference| preference.matches(location, region))
}

/// What to wear for a place right now.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecommendation {
    pub climate: Climate,
    pub location: LocationPreference,
    pub seasonal_pattern: Option<SeasonalPattern>,
    pub outfit_type: String,
    pub suggested_categories: Vec<String>,
    pub suggested_colors: Vec<String>,
    pub accessories: Vec<String>,
    pub reasoning: String,
}

#[derive(Clone, Debug, Default)]
pub struct ClimateModel {
    thresholds: ClimateThresholds,
}

impl ClimateModel {
    pub fn new(thresholds: ClimateThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClimateThresholds {
        &self.thresholds
    }

    /// Temperature decides when a reading exists; otherwise region/country
    /// keywords, defaulting to Temperate.
    pub fn classify(&self, weather: Option<&WeatherContext>, region: &str, country: &str) -> Climate {
        if let Some(weather) = weather {
            return self.thresholds.classify(weather.temperature);
        }

        let region = region.to_lowercase();
        let country = country.to_lowercase();
        let mentions = |keywords: &[&str]| {
            keywords.iter().any(|keyword| region.contains(keyword) || country.contains(keyword))
        };

        if mentions(COLD_KEYWORDS) {
            Climate::Cold
        } else if mentions(HOT_KEYWORDS) {
            Climate::Hot
        } else {
            Climate::Temperate
        }
    }

    pub fn get_or_infer_location(
        &self,
        location: &str,
        region: &str,
        country: &str,
        weather: Option<&WeatherContext>,
        known: &[LocationPreference],
        now: DateTime<Utc>,
    ) -> LocationPreference {
        if let Some(stored) = find_location(known, location, region) {
            return stored.clone();
        }

        let climate = self.classify(weather, region, country);
        debug!(
            event_name = "location.inferred",
            location,
            region,
            climate = climate.as_str(),
            from_weather = weather.is_some(),
            "synthesized location preference"
        );

        LocationPreference {
            location: location.to_string(),
            region: region.to_string(),
            country: country.to_string(),
            climate,
            seasonal_patterns: seasonal_patterns(climate),
            confidence: INFERRED_LOCATION_CONFIDENCE,
            last_updated: now,
        }
    }

    pub fn recommend(
        &self,
        location: &str,
        region: &str,
        country: &str,
        weather: Option<&WeatherContext>,
        known: &[LocationPreference],
        now: DateTime<Utc>,
    ) -> LocationRecommendation {
        let preference = self.get_or_infer_location(location, region, country, weather, known, now);
        let season = Season::current(now);
        let pattern = preference.pattern_for(season).cloned();
        let accessories = climate_accessories(preference.climate, weather);

        let (outfit_type, suggested_categories, suggested_colors, reasoning) = match &pattern {
            Some(pattern) => (
                format!("{} {}", pattern.season, preference.climate),
                pattern.preferred_categories.iter().take(3).cloned().collect(),
                pattern.preferred_colors.iter().take(3).cloned().collect(),
                format!("Optimized for {} climate in {}", preference.climate, pattern.season),
            ),
            None => (
                "Versatile".to_string(),
                vec!["T-shirt".to_string(), "Light jacket".to_string()],
                Vec::new(),
                "Based on your location and current weather".to_string(),
            ),
        };

        LocationRecommendation {
            climate: preference.climate,
            location: preference,
            seasonal_pattern: pattern,
            outfit_type,
            suggested_categories,
            suggested_colors,
            accessories,
            reasoning,
        }
    }
}

pub fn climate_accessories(climate: Climate, weather: Option<&WeatherContext>) -> Vec<String> {
    let base: &[&str] = match climate {
        Climate::Cold => &["Scarf", "Gloves", "Winter hat"],
        Climate::Hot => &["Sunglasses", "Hat", "Light scarf"],
        Climate::Temperate | Climate::Warm => &["Light scarf", "Comfortable shoes"],
    };
    let mut accessories: Vec<String> = base.iter().map(|s| s.to_string()).collect();

    if let Some(weather) = weather {
        if weather.is_wet() {
            accessories.push("Umbrella".to_string());
        }
        if weather.wind_speed > STRONG_WIND {
            accessories.push("Windbreaker".to_string());
        }
    }

    accessories
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn january() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn thresholds_split_into_four_bands() {
        let thresholds = ClimateThresholds::default();
        assert_eq!(thresholds.classify(-3.0), Climate::Cold);
        assert_eq!(thresholds.classify(9.99), Climate::Cold);
        assert_eq!(thresholds.classify(10.0), Climate::Temperate);
        assert_eq!(thresholds.classify(25.0), Climate::Warm);
        assert_eq!(thresholds.classify(30.0), Climate::Hot);
    }

    #[test]
    fn keyword_fallback_without_weather() {
        let model = ClimateModel::default();
        assert_eq!(model.classify(None, "Northern Territories", ""), Climate::Cold);
        assert_eq!(model.classify(None, "Yukon", "Canada"), Climate::Cold);
        assert_eq!(model.classify(None, "Sahara Desert", "Algeria"), Climate::Hot);
        assert_eq!(model.classify(None, "Bavaria", "Germany"), Climate::Temperate);
    }

    #[test]
    fn weather_reading_overrides_keywords() {
        let model = ClimateModel::default();
        let weather = WeatherContext::new(33.0, 0.0);
        assert_eq!(model.classify(Some(&weather), "Arctic", "Canada"), Climate::Hot);

        let freezing = WeatherContext::new(0.0, 0.0);
        assert_eq!(model.classify(Some(&freezing), "Tropical coast", ""), Climate::Cold);
    }

    #[test]
    fn hot_synthesis_has_one_complete_pattern_per_season() {
        let model = ClimateModel::default();
        let preference = model.get_or_infer_location(
            "Phoenix",
            "Arizona",
            "USA",
            Some(&WeatherContext::new(38.0, 0.0)),
            &[],
            january(),
        );

        assert_eq!(preference.climate, Climate::Hot);
        assert_eq!(preference.seasonal_patterns.len(), 4);
        for season in Season::CALENDAR {
            let pattern = preference.pattern_for(season).expect("pattern for every season");
            assert!(!pattern.preferred_categories.is_empty());
            assert!(!pattern.preferred_colors.is_empty());
            assert!((0.6..=0.9).contains(&pattern.confidence));
        }
    }

    #[test]
    fn every_climate_table_is_complete() {
        for climate in [Climate::Cold, Climate::Temperate, Climate::Warm, Climate::Hot] {
            let patterns = seasonal_patterns(climate);
            assert_eq!(patterns.len(), 4, "{climate} should cover four seasons");
            for pattern in &patterns {
                assert!((2..=3).contains(&pattern.preferred_categories.len()));
                assert!((2..=3).contains(&pattern.preferred_colors.len()));
            }
        }
    }

    #[test]
    fn stored_location_is_returned_unchanged() {
        let model = ClimateModel::default();
        let stored = LocationPreference {
            location: "Oslo".to_string(),
            region: "Ostlandet".to_string(),
            country: "Norway".to_string(),
            climate: Climate::Cold,
            seasonal_patterns: Vec::new(),
            confidence: 0.95,
            last_updated: january(),
        };

        let found = model.get_or_infer_location(
            "elsewhere",
            "ostlandet",
            "Norway",
            Some(&WeatherContext::new(35.0, 0.0)),
            std::slice::from_ref(&stored),
            january(),
        );
        assert_eq!(found, stored);
    }

    #[test]
    fn recommendation_uses_current_season_and_weather_accessories() {
        let model = ClimateModel::default();
        let weather = WeatherContext::new(-2.0, 0.6).with_wind_speed(20.0);

        let recommendation =
            model.recommend("Montreal", "Quebec", "Canada", Some(&weather), &[], january());

        assert_eq!(recommendation.climate, Climate::Cold);
        assert_eq!(recommendation.outfit_type, "Winter Cold");
        assert_eq!(recommendation.suggested_categories, vec!["Outerwear", "Sweaters", "Thermal"]);
        assert_eq!(
            recommendation.accessories,
            vec!["Scarf", "Gloves", "Winter hat", "Umbrella", "Windbreaker"]
        );
        assert_eq!(recommendation.reasoning, "Optimized for Cold climate in Winter");
    }

    #[test]
    fn recommendation_without_pattern_is_versatile() {
        let model = ClimateModel::default();
        let stored = LocationPreference {
            location: "Lisbon".to_string(),
            region: "Lisboa".to_string(),
            country: "Portugal".to_string(),
            climate: Climate::Warm,
            seasonal_patterns: Vec::new(),
            confidence: 0.5,
            last_updated: january(),
        };

        let recommendation =
            model.recommend("Lisbon", "", "Portugal", None, std::slice::from_ref(&stored), january());
        assert_eq!(recommendation.outfit_type, "Versatile");
        assert!(recommendation.seasonal_pattern.is_none());
        assert_eq!(recommendation.accessories, vec!["Light scarf", "Comfortable shoes"]);
    }
}
