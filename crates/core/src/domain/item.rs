use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::season::Season;
use super::tags::{labels_match, TagSet};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub category: String,
    pub color: String,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(rename = "season")]
    pub seasons: Vec<Season>,
    #[serde(default, rename = "timesWorn")]
    pub wear_count: u32,
    #[serde(default)]
    pub last_worn: Option<DateTime<Utc>>,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, rename = "isFavorite")]
    pub favorite: bool,
}

impl ClothingItem {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        color: impl Into<String>,
        seasons: Vec<Season>,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category: category.into(),
            color: color.into(),
            tags: TagSet::new(),
            seasons,
            wear_count: 0,
            last_worn: None,
            added_at,
            brand: None,
            favorite: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().copied().collect();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_last_worn(mut self, last_worn: DateTime<Utc>) -> Self {
        self.last_worn = Some(last_worn);
        self
    }

    /// Name for user-facing text, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn is_category(&self, category: &str) -> bool {
        labels_match(&self.category, category)
    }

    pub fn in_any_category(&self, categories: &[&str]) -> bool {
        categories.iter().any(|category| self.is_category(category))
    }

    /// Year-round items fit every season.
    pub fn fits_season(&self, season: Season) -> bool {
        self.seasons.iter().any(|declared| *declared == season || *declared == Season::AllSeasons)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.category.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "clothing item `{}` has an empty category",
                self.id
            )));
        }
        if self.color.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "clothing item `{}` has an empty color",
                self.id
            )));
        }
        if self.seasons.is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "clothing item `{}` declares no seasons",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn jacket() -> ClothingItem {
        ClothingItem::new(
            "item-1",
            "Outerwear",
            "Navy",
            vec![Season::Fall, Season::Winter],
            Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn category_match_is_case_insensitive() {
        let item = jacket();
        assert!(item.is_category("outerwear"));
        assert!(item.in_any_category(&["Sweaters", "OUTERWEAR"]));
        assert!(!item.is_category("Tops"));
    }

    #[test]
    fn all_seasons_sentinel_fits_everything() {
        let mut item = jacket();
        assert!(!item.fits_season(Season::Summer));

        item.seasons = vec![Season::AllSeasons];
        assert!(item.fits_season(Season::Summer));
    }

    #[test]
    fn validation_rejects_empty_color_and_seasons() {
        let mut item = jacket();
        item.color = " ".to_string();
        assert!(matches!(item.validate(), Err(DomainError::InvariantViolation(_))));

        let mut item = jacket();
        item.seasons.clear();
        assert!(item.validate().is_err());
        assert!(jacket().validate().is_ok());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(jacket().display_name(), "item-1");
        assert_eq!(jacket().with_name("Pea coat").display_name(), "Pea coat");
    }

    #[test]
    fn reads_stored_wardrobe_field_names() {
        let raw = r#"{
            "id": "t1",
            "name": "Linen shirt",
            "category": "Tops",
            "color": "White",
            "tags": ["Relaxed"],
            "season": ["Summer", "All Seasons"],
            "timesWorn": 4,
            "addedAt": "2024-03-01T10:00:00Z",
            "isFavorite": true
        }"#;

        let item: ClothingItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.wear_count, 4);
        assert!(item.favorite);
        assert!(item.tags.contains("relaxed"));
        assert_eq!(item.brand, None);
    }
}
