use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::ClothingItem;
use super::season::Season;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "items")]
    pub item_ids: Vec<String>,
    #[serde(default, rename = "season")]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub occasion: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub last_worn: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Outfit {
    pub fn new(id: impl Into<String>, item_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            item_ids,
            seasons: Vec::new(),
            occasion: String::new(),
            favorite: false,
            last_worn: None,
            created_at: None,
        }
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = occasion.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_last_worn(mut self, last_worn: DateTime<Utc>) -> Self {
        self.last_worn = Some(last_worn);
        self
    }

    /// Last worn, else created. `None` sorts behind every dated outfit.
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.last_worn.or(self.created_at)
    }

    /// Member items in outfit order. Ids with no matching item are skipped.
    pub fn resolve_items<'a>(&self, items: &'a [ClothingItem]) -> Vec<&'a ClothingItem> {
        self.item_ids
            .iter()
            .filter_map(|id| items.iter().find(|item| item.id == *id))
            .collect()
    }
}
