//! Resolved weather reading handed to the engine by the weather collaborator.
//!
//! Values are not range-checked here. Absurd temperatures or precipitation
//! simply flow through the scoring formulas.

use serde::{Deserialize, Serialize};

use super::season::Season;

/// Precipitation fraction above which rain gear matters.
pub const SIGNIFICANT_PRECIPITATION: f64 = 0.3;
/// Wind speed above which a windbreaker is suggested.
pub const STRONG_WIND: f64 = 15.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherContext {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Fraction in 0..=1 (0 = dry, 1 = heavy rain).
    pub precipitation: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub wind_speed: f64,
}

/// Coarse weather label used for season matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherDescriptor {
    Sunny,
    Rainy,
    Cold,
    Hot,
    Mild,
}

impl WeatherDescriptor {
    pub fn appropriate_seasons(self) -> &'static [Season] {
        match self {
            WeatherDescriptor::Sunny => &[Season::Spring, Season::Summer],
            WeatherDescriptor::Rainy => &[Season::Fall, Season::Spring],
            WeatherDescriptor::Cold => &[Season::Winter, Season::Fall],
            WeatherDescriptor::Hot => &[Season::Summer],
            WeatherDescriptor::Mild => &[Season::Spring, Season::Fall],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherDescriptor::Sunny => "sunny",
            WeatherDescriptor::Rainy => "rainy",
            WeatherDescriptor::Cold => "cold",
            WeatherDescriptor::Hot => "hot",
            WeatherDescriptor::Mild => "mild",
        }
    }
}

/// Layering advice derived purely from a weather reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherGuidance {
    pub outfit_type: String,
    pub layers: Vec<String>,
    pub accessories: Vec<String>,
    pub footwear: String,
    /// Percentage, capped at 95.
    pub confidence: u8,
    pub reasoning: String,
}

const RAIN_WORDS: &[&str] = &["rain", "drizzle", "shower", "storm", "thunder"];
const SNOW_WORDS: &[&str] = &["snow", "sleet", "freez", "ice", "frost"];
const SUN_WORDS: &[&str] = &["sun", "clear"];

impl WeatherContext {
    pub fn new(temperature: f64, precipitation: f64) -> Self {
        Self { temperature, precipitation, ..Self::default() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(
        mut self,
        location: impl Into<String>,
        region: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.location = location.into();
        self.region = region.into();
        self.country = country.into();
        self
    }

    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    pub fn is_wet(&self) -> bool {
        self.precipitation > SIGNIFICANT_PRECIPITATION
    }

    /// Explicit precipitation words in the description win, then the
    /// measured values, then a sunny/clear description.
    pub fn descriptor(&self) -> WeatherDescriptor {
        let description = self.description.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|word| description.contains(word));

        if mentions(RAIN_WORDS) {
            WeatherDescriptor::Rainy
        } else if mentions(SNOW_WORDS) {
            WeatherDescriptor::Cold
        } else if self.is_wet() {
            WeatherDescriptor::Rainy
        } else if self.temperature < 10.0 {
            WeatherDescriptor::Cold
        } else if self.temperature >= 25.0 {
            WeatherDescriptor::Hot
        } else if mentions(SUN_WORDS) {
            WeatherDescriptor::Sunny
        } else {
            WeatherDescriptor::Mild
        }
    }

    pub fn guidance(&self) -> WeatherGuidance {
        let t = self.temperature;
        let (outfit_type, layers, accessories, footwear, reasoning): (
            &str,
            &[&str],
            &[&str],
            &str,
            &str,
        ) = if t < 5.0 {
            (
                "Heavy Winter",
                &["Thermal base layer", "Warm sweater", "Heavy coat"],
                &["Scarf", "Gloves", "Winter hat"],
                "Insulated boots",
                "Very cold weather requires multiple warm layers",
            )
        } else if t < 15.0 {
            (
                "Light Winter",
                &["Long sleeve shirt", "Light sweater", "Jacket"],
                &["Light scarf", "Gloves"],
                "Closed-toe shoes",
                "Cool weather needs light layering",
            )
        } else if t < 25.0 {
            (
                "Spring/Fall",
                &["T-shirt or blouse", "Light jacket or cardigan"],
                &["Light scarf (optional)"],
                "Comfortable shoes",
                "Mild weather allows for light, comfortable clothing",
            )
        } else {
            (
                "Summer",
                &["Light t-shirt or tank top"],
                &["Sunglasses", "Hat"],
                "Sandals or light shoes",
                "Warm weather calls for light, breathable clothing",
            )
        };

        let mut guidance = WeatherGuidance {
            outfit_type: outfit_type.to_string(),
            layers: layers.iter().map(|s| s.to_string()).collect(),
            accessories: accessories.iter().map(|s| s.to_string()).collect(),
            footwear: footwear.to_string(),
            confidence: if t > 15.0 && t < 25.0 { 90 } else { 70 },
            reasoning: reasoning.to_string(),
        };

        if self.is_wet() {
            guidance.accessories.push("Umbrella".to_string());
            guidance.footwear = "Waterproof shoes".to_string();
            guidance.reasoning.push_str(" with rain protection");
        }
        if self.wind_speed > STRONG_WIND {
            guidance.accessories.push("Windbreaker".to_string());
            guidance.reasoning.push_str(" and wind protection");
        }

        guidance
    }
}
