use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::item::ClothingItem;
use crate::domain::tags::{labels_match, normalize_tag};

const TOP_LABELS: usize = 3;
/// Wardrobe size at which a snapshot reaches full confidence.
const FULL_CONFIDENCE_ITEMS: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StylePersonality {
    Professional,
    Minimalist,
    Streetwear,
    Feminine,
    Classic,
    Versatile,
}

impl StylePersonality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Minimalist => "Minimalist",
            Self::Streetwear => "Streetwear",
            Self::Feminine => "Feminine",
            Self::Classic => "Classic",
            Self::Versatile => "Versatile",
        }
    }
}

impl fmt::Display for StylePersonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time summary of what the wardrobe leans towards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEvolutionEntry {
    pub date: DateTime<Utc>,
    pub dominant_colors: Vec<String>,
    pub preferred_categories: Vec<String>,
    pub style_personality: StylePersonality,
    pub confidence: f64,
}

pub fn track_style_evolution(items: &[ClothingItem], now: DateTime<Utc>) -> StyleEvolutionEntry {
    let dominant_colors = top_labels(items.iter().map(|item| item.color.as_str()));
    let preferred_categories = top_labels(items.iter().map(|item| item.category.as_str()));
    let style_personality = determine_style_personality(&preferred_categories, &dominant_colors);

    StyleEvolutionEntry {
        date: now,
        dominant_colors,
        preferred_categories,
        style_personality,
        confidence: (items.len() as f64 / FULL_CONFIDENCE_ITEMS).min(1.0),
    }
}

pub fn determine_style_personality(categories: &[String], colors: &[String]) -> StylePersonality {
    let has = |labels: &[String], wanted: &str| labels.iter().any(|label| labels_match(label, wanted));
    let has_any =
        |labels: &[String], wanted: &[&str]| wanted.iter().any(|candidate| has(labels, candidate));

    if has_any(categories, &["Formal", "Business"]) {
        StylePersonality::Professional
    } else if has(colors, "Black") && has(colors, "White") {
        StylePersonality::Minimalist
    } else if has_any(categories, &["Streetwear", "Casual"]) {
        StylePersonality::Streetwear
    } else if has_any(colors, &["Pink", "Purple", "Pastel"]) {
        StylePersonality::Feminine
    } else if has_any(colors, &["Navy", "Brown", "Beige"]) {
        StylePersonality::Classic
    } else {
        StylePersonality::Versatile
    }
}

/// Most frequent labels, compared case-insensitively. Ties keep first-seen
/// order and the first spelling seen is reported.
fn top_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: Vec<(String, String, usize)> = Vec::new();
    for label in labels {
        let key = normalize_tag(label);
        if key.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(existing, _, _)| *existing == key) {
            Some((_, _, count)) => *count += 1,
            None => counts.push((key, label.trim().to_string(), 1)),
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.2.cmp(&a.2));
    counts.into_iter().take(TOP_LABELS).map(|(_, label, _)| label).collect()
}
