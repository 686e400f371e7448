//! JSON wardrobe state file shared by the commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wardrobe_core::domain::item::ClothingItem;
use wardrobe_core::domain::outfit::Outfit;
use wardrobe_core::session::PreferenceState;

/// Items and outfits plus one user's preference state. Preference fields
/// sit at the top level next to `items` and `outfits`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeState {
    #[serde(default)]
    pub items: Vec<ClothingItem>,
    #[serde(default)]
    pub outfits: Vec<Outfit>,
    #[serde(flatten)]
    pub preferences: PreferenceState,
}

impl WardrobeState {
    pub fn item(&self, id: &str) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn outfit(&self, id: &str) -> Option<&Outfit> {
        self.outfits.iter().find(|outfit| outfit.id == id)
    }
}

pub fn load(path: &Path) -> Result<WardrobeState> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read wardrobe state `{}`", path.display()))?;
    let state: WardrobeState = serde_json::from_str(&raw)
        .with_context(|| format!("could not parse wardrobe state `{}`", path.display()))?;

    for item in &state.items {
        item.validate().with_context(|| format!("invalid item in `{}`", path.display()))?;
    }

    debug!(
        event_name = "cli.state.loaded",
        path = %path.display(),
        items = state.items.len(),
        outfits = state.outfits.len(),
        "wardrobe state loaded"
    );
    Ok(state)
}

/// Writes through a sibling temp file so a failed write never truncates
/// the existing state.
pub fn save(path: &Path, state: &WardrobeState) -> Result<()> {
    let raw = serde_json::to_string_pretty(state).context("could not serialize wardrobe state")?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, raw)
        .with_context(|| format!("could not write wardrobe state `{}`", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("could not replace wardrobe state `{}`", path.display()))?;

    debug!(event_name = "cli.state.saved", path = %path.display(), "wardrobe state saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use wardrobe_core::domain::season::Season;

    use super::*;

    #[test]
    fn state_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("wardrobe.json");
        let added = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let state = WardrobeState {
            items: vec![ClothingItem::new("tee", "Tops", "White", vec![Season::Summer], added)],
            outfits: vec![Outfit::new("o1", vec!["tee".to_string()])],
            preferences: PreferenceState::default(),
        };

        save(&path, &state).expect("save");
        let loaded = load(&path).expect("load");

        assert_eq!(loaded, state);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn preference_fields_are_top_level_camel_case() {
        let raw = r#"{
            "items": [],
            "profile": {"styleProfile": "Casual", "likedColors": ["Navy"]},
            "feedbackHistory": []
        }"#;

        let state: WardrobeState = serde_json::from_str(raw).expect("parse");

        let profile = state.preferences.profile.expect("profile");
        assert_eq!(profile.style_profile, "Casual");
        assert!(profile.liked_colors.contains("navy"));
        assert!(state.outfits.is_empty());
    }

    #[test]
    fn invalid_items_are_rejected_on_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("wardrobe.json");
        fs::write(
            &path,
            r#"{"items": [{"id": "x", "category": "", "color": "Red", "season": ["Summer"], "addedAt": "2024-01-01T00:00:00Z"}]}"#,
        )
        .expect("write");

        let error = load(&path).expect_err("empty category should fail");
        assert!(format!("{error:#}").contains("empty category"));
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load(Path::new("/nonexistent/wardrobe.json")).expect_err("missing");
        assert!(error.to_string().contains("/nonexistent/wardrobe.json"));
    }
}
