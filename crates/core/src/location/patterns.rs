//! Fixed per-climate seasonal table used when a location has no history.

use super::{Climate, SeasonalPattern};
use crate::domain::season::Season;

struct PatternSeed {
    season: Season,
    categories: &'static [&'static str],
    colors: &'static [&'static str],
    average_temperature: f64,
    confidence: f64,
}

const COLD: &[PatternSeed] = &[
    PatternSeed {
        season: Season::Spring,
        categories: &["Light Jackets", "Sweaters"],
        colors: &["Pastel", "Light Blue", "Pink"],
        average_temperature: 10.0,
        confidence: 0.7,
    },
    PatternSeed {
        season: Season::Summer,
        categories: &["T-shirts", "Light Tops"],
        colors: &["White", "Light Colors"],
        average_temperature: 20.0,
        confidence: 0.6,
    },
    PatternSeed {
        season: Season::Fall,
        categories: &["Jackets", "Sweaters"],
        colors: &["Brown", "Orange", "Red"],
        average_temperature: 5.0,
        confidence: 0.8,
    },
    PatternSeed {
        season: Season::Winter,
        categories: &["Outerwear", "Sweaters", "Thermal"],
        colors: &["Black", "Navy", "Gray"],
        average_temperature: -5.0,
        confidence: 0.8,
    },
];

const TEMPERATE: &[PatternSeed] = &[
    PatternSeed {
        season: Season::Spring,
        categories: &["Light Jackets", "T-shirts"],
        colors: &["Pastel", "Light Blue"],
        average_temperature: 15.0,
        confidence: 0.8,
    },
    PatternSeed {
        season: Season::Summer,
        categories: &["T-shirts", "Shorts"],
        colors: &["Bright Colors", "White"],
        average_temperature: 25.0,
        confidence: 0.8,
    },
    PatternSeed {
        season: Season::Fall,
        categories: &["Sweaters", "Jackets"],
        colors: &["Earth Tones", "Brown"],
        average_temperature: 10.0,
        confidence: 0.7,
    },
    PatternSeed {
        season: Season::Winter,
        categories: &["Sweaters", "Jackets"],
        colors: &["Dark Colors", "Navy"],
        average_temperature: 5.0,
        confidence: 0.7,
    },
];

const WARM: &[PatternSeed] = &[
    PatternSeed {
        season: Season::Spring,
        categories: &["T-shirts", "Light Jackets"],
        colors: &["Pastel", "White"],
        average_temperature: 20.0,
        confidence: 0.8,
    },
    PatternSeed {
        season: Season::Summer,
        categories: &["T-shirts", "Shorts", "Dresses"],
        colors: &["White", "Bright Colors"],
        average_temperature: 28.0,
        confidence: 0.8,
    },
    PatternSeed {
        season: Season::Fall,
        categories: &["Light Jackets", "Tops"],
        colors: &["Earth Tones", "Olive"],
        average_temperature: 18.0,
        confidence: 0.7,
    },
    PatternSeed {
        season: Season::Winter,
        categories: &["Jackets", "Sweaters"],
        colors: &["Navy", "Burgundy"],
        average_temperature: 10.0,
        confidence: 0.7,
    },
];

const HOT: &[PatternSeed] = &[
    PatternSeed {
        season: Season::Spring,
        categories: &["T-shirts", "Light Tops"],
        colors: &["Bright Colors", "White"],
        average_temperature: 25.0,
        confidence: 0.8,
    },
    PatternSeed {
        season: Season::Summer,
        categories: &["Tank Tops", "Shorts"],
        colors: &["White", "Bright Colors"],
        average_temperature: 35.0,
        confidence: 0.9,
    },
    PatternSeed {
        season: Season::Fall,
        categories: &["T-shirts", "Light Jackets"],
        colors: &["Earth Tones", "Orange"],
        average_temperature: 20.0,
        confidence: 0.7,
    },
    PatternSeed {
        season: Season::Winter,
        categories: &["Light Jackets", "Long Sleeves"],
        colors: &["Light Colors", "Beige"],
        average_temperature: 15.0,
        confidence: 0.7,
    },
];

/// One pattern per calendar season, in Spring..Winter order.
pub fn seasonal_patterns(climate: Climate) -> Vec<SeasonalPattern> {
    let seeds = match climate {
        Climate::Cold => COLD,
        Climate::Temperate => TEMPERATE,
        Climate::Warm => WARM,
        Climate::Hot => HOT,
    };

    seeds
        .iter()
        .map(|seed| SeasonalPattern {
            season: seed.season,
            preferred_categories: seed.categories.iter().map(|s| s.to_string()).collect(),
            preferred_colors: seed.colors.iter().map(|s| s.to_string()).collect(),
            average_temperature: seed.average_temperature,
            confidence: seed.confidence,
        })
        .collect()
}
