//! Declarative style profile captured during persona setup.

use serde::{Deserialize, Serialize};

use super::item::ClothingItem;
use super::tags::{labels_match, TagSet};

/// Tags that signal an eco-conscious item.
pub const SUSTAINABLE_TAGS: &[&str] = &["sustainable", "eco-friendly", "organic", "recycled"];

pub const MAX_STYLING_TIPS: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetRange {
    Low,
    #[default]
    Medium,
    High,
    Luxury,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherSensitivity {
    #[serde(rename = "Very sensitive")]
    VerySensitive,
    Sensitive,
    #[default]
    Normal,
    #[serde(rename = "Not sensitive")]
    NotSensitive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
    #[serde(rename = "Very high")]
    VeryHigh,
}

impl ActivityLevel {
    /// Item tags that suit this activity level.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ActivityLevel::Low => &["comfortable", "relaxed", "casual"],
            ActivityLevel::Moderate => &["versatile", "balanced", "everyday"],
            ActivityLevel::High => &["active", "sporty", "athletic", "performance"],
            ActivityLevel::VeryHigh => &["athletic", "performance", "technical", "sport"],
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, ActivityLevel::High | ActivityLevel::VeryHigh)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Low => "Low",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
            ActivityLevel::VeryHigh => "Very high",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceProfile {
    pub style_profile: String,
    pub liked_colors: TagSet,
    /// Wins over `liked_colors` when a color appears in both.
    pub disliked_colors: TagSet,
    pub occasions: TagSet,
    pub preferred_fit: String,
    pub budget_range: BudgetRange,
    pub sustainability_preference: bool,
    pub weather_sensitivity: WeatherSensitivity,
    pub activity_level: ActivityLevel,
    pub avoid_patterns: TagSet,
}

impl PreferenceProfile {
    pub fn new(style_profile: impl Into<String>, preferred_fit: impl Into<String>) -> Self {
        Self {
            style_profile: style_profile.into(),
            preferred_fit: preferred_fit.into(),
            ..Self::default()
        }
    }

    pub fn with_liked_colors(mut self, colors: &[&str]) -> Self {
        self.liked_colors = colors.iter().copied().collect();
        self
    }

    pub fn with_disliked_colors(mut self, colors: &[&str]) -> Self {
        self.disliked_colors = colors.iter().copied().collect();
        self
    }

    pub fn with_occasions(mut self, occasions: &[&str]) -> Self {
        self.occasions = occasions.iter().copied().collect();
        self
    }

    pub fn with_avoid_patterns(mut self, patterns: &[&str]) -> Self {
        self.avoid_patterns = patterns.iter().copied().collect();
        self
    }

    pub fn with_activity_level(mut self, activity_level: ActivityLevel) -> Self {
        self.activity_level = activity_level;
        self
    }

    pub fn with_weather_sensitivity(mut self, sensitivity: WeatherSensitivity) -> Self {
        self.weather_sensitivity = sensitivity;
        self
    }

    pub fn with_sustainability(mut self, enabled: bool) -> Self {
        self.sustainability_preference = enabled;
        self
    }

    /// No stated liked colors means every color is acceptable.
    pub fn is_color_preferred(&self, color: &str) -> bool {
        self.liked_colors.is_empty() || self.liked_colors.contains(color)
    }

    pub fn is_color_disliked(&self, color: &str) -> bool {
        self.disliked_colors.contains(color)
    }

    /// Explicitly liked and not also disliked. A dislike wins on conflict.
    pub fn is_color_favored(&self, color: &str) -> bool {
        self.liked_colors.contains(color) && !self.is_color_disliked(color)
    }

    pub fn is_pattern_avoided(&self, pattern: &str) -> bool {
        self.avoid_patterns.contains(pattern)
    }

    pub fn cares_about_occasion(&self, occasion: &str) -> bool {
        self.occasions.contains(occasion)
    }

    pub fn matches_style(&self, tags: &TagSet) -> bool {
        tags.contains(&self.style_profile)
    }

    pub fn matches_fit(&self, tags: &TagSet) -> bool {
        tags.contains(&self.preferred_fit)
    }

    pub fn matches_activity(&self, tags: &TagSet) -> bool {
        tags.contains_any(self.activity_level.keywords())
    }

    pub fn matches_sustainability(&self, tags: &TagSet) -> bool {
        self.sustainability_preference && tags.contains_any(SUSTAINABLE_TAGS)
    }

    pub fn is_style(&self, style: &str) -> bool {
        labels_match(&self.style_profile, style)
    }

    /// Drops items in disliked colors or tagged with an avoided pattern.
    pub fn filter_items<'a, I>(&self, items: I) -> Vec<&'a ClothingItem>
    where
        I: IntoIterator<Item = &'a ClothingItem>,
    {
        items
            .into_iter()
            .filter(|item| !self.is_color_disliked(&item.color))
            .filter(|item| !item.tags.iter().any(|tag| self.is_pattern_avoided(tag)))
            .collect()
    }

    /// Styles, colors and tags to favor for `occasion`.
    pub fn personalized_suggestions(&self, occasion: Option<&str>) -> PersonalizedSuggestions {
        let mut suggestions = PersonalizedSuggestions {
            suggested_styles: vec![self.style_profile.to_lowercase()],
            suggested_colors: self.liked_colors.iter().map(str::to_string).collect(),
            avoid_colors: self.disliked_colors.iter().map(str::to_string).collect(),
            priority_tags: vec![self.preferred_fit.to_lowercase()],
        };

        match occasion {
            Some(occasion) if labels_match(occasion, "Work") => {
                suggestions.extend(&["professional", "formal"], &["business", "office"]);
            }
            Some(occasion) if labels_match(occasion, "Casual") => {
                suggestions.extend(&["relaxed", "comfortable"], &["everyday", "casual"]);
            }
            _ => {}
        }
        if self.activity_level.is_active() {
            suggestions.extend(&[], &["comfortable", "flexible", "breathable"]);
        }
        if self.sustainability_preference {
            suggestions.extend(&[], &["sustainable", "eco-friendly", "ethical"]);
        }

        suggestions
    }

    /// At most [`MAX_STYLING_TIPS`] tips, style-specific ones first.
    pub fn styling_tips(&self) -> Vec<String> {
        let style_tips: &[&str] = if self.is_style("Casual") {
            &[
                "Layer different textures for visual interest",
                "Mix high and low pieces for effortless style",
                "Invest in quality basics that can be styled multiple ways",
            ]
        } else if self.is_style("Formal") {
            &[
                "Ensure proper fit - tailoring makes a huge difference",
                "Stick to classic colors for versatility",
                "Pay attention to fabric quality and care",
            ]
        } else if self.is_style("Minimalist") {
            &[
                "Focus on clean lines and simple silhouettes",
                "Build a capsule wardrobe with versatile pieces",
                "Choose quality over quantity",
            ]
        } else if self.is_style("Streetwear") {
            &[
                "Mix oversized and fitted pieces for balance",
                "Experiment with bold colors and patterns",
                "Accessorize to complete your look",
            ]
        } else {
            &[]
        };

        let mut tips: Vec<String> = style_tips.iter().map(|tip| tip.to_string()).collect();
        if !self.liked_colors.is_empty() {
            let colors: Vec<&str> = self.liked_colors.iter().collect();
            tips.push(format!("Build outfits around your preferred colors: {}", colors.join(", ")));
        }
        if self.activity_level.is_active() {
            tips.push("Choose breathable, flexible fabrics for your active lifestyle".to_string());
            tips.push("Invest in quality athletic wear that transitions well".to_string());
        }
        if self.sustainability_preference {
            tips.push("Consider cost-per-wear when making purchases".to_string());
            tips.push("Look for timeless pieces that won't go out of style".to_string());
            tips.push("Take care of your clothes to extend their lifespan".to_string());
        }

        tips.truncate(MAX_STYLING_TIPS);
        tips
    }
}

/// Context-aware hints derived from a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedSuggestions {
    pub suggested_styles: Vec<String>,
    pub suggested_colors: Vec<String>,
    pub avoid_colors: Vec<String>,
    pub priority_tags: Vec<String>,
}

impl PersonalizedSuggestions {
    /// Used when no profile has been set up yet.
    pub fn without_profile() -> Self {
        Self {
            suggested_styles: vec!["casual".to_string()],
            suggested_colors: Vec::new(),
            avoid_colors: Vec::new(),
            priority_tags: Vec::new(),
        }
    }

    fn extend(&mut self, styles: &[&str], tags: &[&str]) {
        self.suggested_styles.extend(styles.iter().map(|style| style.to_string()));
        self.priority_tags.extend(tags.iter().map(|tag| tag.to_string()));
    }
}
