//! Online learning from like/dislike feedback.
//!
//! Each observed (dimension, value) pair carries a confidence in [0, 1].
//! Feedback nudges confidence by a fixed learning rate and clamps at the
//! bounds. Because of the clamp, like/dislike sequences do not commute:
//! ten likes then one dislike from 0.5 ends at 0.9, while one dislike then
//! ten likes ends at 1.0.

mod evolution;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use evolution::{determine_style_personality, track_style_evolution, StyleEvolutionEntry, StylePersonality};

use crate::domain::feedback::{FeedbackEvent, FeedbackKind};
use crate::domain::item::ClothingItem;
use crate::domain::tags::labels_match;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_ACCURACY_WINDOW_DAYS: i64 = 30;
/// Confidence of a key on first observation.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceDimension {
    Category,
    Color,
    Brand,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnedPreferenceWeight {
    pub dimension: PreferenceDimension,
    pub value: String,
    pub confidence: f64,
    pub last_updated: DateTime<Utc>,
}

/// Every key ever observed. Entries are never removed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnedWeights {
    entries: Vec<LearnedPreferenceWeight>,
}

impl LearnedWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LearnedPreferenceWeight> {
        self.entries.iter()
    }

    pub fn get(&self, dimension: PreferenceDimension, value: &str) -> Option<&LearnedPreferenceWeight> {
        self.entries
            .iter()
            .find(|entry| entry.dimension == dimension && labels_match(&entry.value, value))
    }

    pub fn confidence(&self, dimension: PreferenceDimension, value: &str) -> Option<f64> {
        self.get(dimension, value).map(|entry| entry.confidence)
    }

    /// Mean confidence over whichever of the item's category, color and
    /// brand have been observed. `None` when none have.
    pub fn item_confidence(&self, item: &ClothingItem) -> Option<f64> {
        let known: Vec<f64> = item_keys(item)
            .filter_map(|(dimension, value)| self.confidence(dimension, value))
            .collect();

        if known.is_empty() {
            None
        } else {
            Some(known.iter().sum::<f64>() / known.len() as f64)
        }
    }

    fn entry_or_insert(
        &mut self,
        dimension: PreferenceDimension,
        value: &str,
        now: DateTime<Utc>,
    ) -> &mut LearnedPreferenceWeight {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.dimension == dimension && labels_match(&entry.value, value));

        let index = match position {
            Some(index) => index,
            None => {
                self.entries.push(LearnedPreferenceWeight {
                    dimension,
                    value: value.trim().to_string(),
                    confidence: DEFAULT_CONFIDENCE,
                    last_updated: now,
                });
                self.entries.len() - 1
            }
        };

        &mut self.entries[index]
    }
}

fn item_keys(item: &ClothingItem) -> impl Iterator<Item = (PreferenceDimension, &str)> {
    [
        Some((PreferenceDimension::Category, item.category.as_str())),
        Some((PreferenceDimension::Color, item.color.as_str())),
        item.brand
            .as_deref()
            .filter(|brand| !brand.trim().is_empty())
            .map(|brand| (PreferenceDimension::Brand, brand)),
    ]
    .into_iter()
    .flatten()
}

#[derive(Clone, Debug)]
pub struct FeedbackLearner {
    learning_rate: f64,
}

impl Default for FeedbackLearner {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE)
    }
}

impl FeedbackLearner {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn delta(&self, feedback: FeedbackKind) -> f64 {
        match feedback {
            FeedbackKind::Like => self.learning_rate,
            FeedbackKind::Dislike => -self.learning_rate,
            FeedbackKind::Neutral => 0.0,
        }
    }

    /// Returns the weight set after applying `event`. An event for an
    /// unknown item returns the weights unchanged.
    pub fn apply_feedback(
        &self,
        current: &LearnedWeights,
        event: &FeedbackEvent,
        items: &[ClothingItem],
        now: DateTime<Utc>,
    ) -> LearnedWeights {
        let mut updated = current.clone();
        self.apply_in_place(&mut updated, event, items, now);
        updated
    }

    /// In-place variant. Returns false when the event's item is unknown.
    pub fn apply_in_place(
        &self,
        weights: &mut LearnedWeights,
        event: &FeedbackEvent,
        items: &[ClothingItem],
        now: DateTime<Utc>,
    ) -> bool {
        let Some(item) = items.iter().find(|item| item.id == event.item_id) else {
            return false;
        };

        let delta = self.delta(event.feedback);
        for (dimension, value) in item_keys(item) {
            let entry = weights.entry_or_insert(dimension, value, now);
            entry.confidence = (entry.confidence + delta).clamp(0.0, 1.0);
            entry.last_updated = now;
        }

        debug!(
            event_name = "learning.feedback_applied",
            item_id = %event.item_id,
            feedback = event.feedback.as_str(),
            delta,
            tracked_keys = weights.len(),
            "feedback applied to learned weights"
        );
        true
    }
}

/// Share of `like` events among feedback within the trailing window.
/// Zero when the window holds no feedback.
pub fn accuracy(history: &[FeedbackEvent], window_days: i64, now: DateTime<Utc>) -> f64 {
    let window_start = now - Duration::days(window_days);
    let recent: Vec<&FeedbackEvent> =
        history.iter().filter(|event| event.timestamp >= window_start).collect();

    if recent.is_empty() {
        return 0.0;
    }

    let likes = recent.iter().filter(|event| event.feedback == FeedbackKind::Like).count();
    likes as f64 / recent.len() as f64
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::season::Season;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn wardrobe() -> Vec<ClothingItem> {
        vec![
            ClothingItem::new("tee", "Tops", "White", vec![Season::Summer], now())
                .with_brand("Uniqlo"),
            ClothingItem::new("jeans", "Bottoms", "Blue", vec![Season::AllSeasons], now()),
        ]
    }

    fn event(item_id: &str, feedback: FeedbackKind) -> FeedbackEvent {
        FeedbackEvent::new(item_id, feedback, now())
    }

    #[test]
    fn first_like_creates_three_keys_above_default() {
        let learner = FeedbackLearner::default();
        let weights =
            learner.apply_feedback(&LearnedWeights::new(), &event("tee", FeedbackKind::Like), &wardrobe(), now());

        assert_eq!(weights.len(), 3);
        for dimension in [PreferenceDimension::Category, PreferenceDimension::Color, PreferenceDimension::Brand] {
            let entry = weights.iter().find(|entry| entry.dimension == dimension).unwrap();
            assert!((entry.confidence - 0.6).abs() < 1e-9);
            assert_eq!(entry.last_updated, now());
        }
    }

    #[test]
    fn items_without_brand_track_two_keys() {
        let learner = FeedbackLearner::default();
        let weights = learner.apply_feedback(
            &LearnedWeights::new(),
            &event("jeans", FeedbackKind::Dislike),
            &wardrobe(),
            now(),
        );

        assert_eq!(weights.len(), 2);
        let color = weights.confidence(PreferenceDimension::Color, "blue").unwrap();
        assert!((color - 0.4).abs() < 1e-9);
        assert_eq!(weights.confidence(PreferenceDimension::Brand, ""), None);
    }

    #[test]
    fn neutral_feedback_never_changes_confidence() {
        let learner = FeedbackLearner::default();
        let items = wardrobe();
        let mut weights = LearnedWeights::new();
        for _ in 0..3 {
            weights = learner.apply_feedback(&weights, &event("tee", FeedbackKind::Like), &items, now());
        }

        let after = learner.apply_feedback(&weights, &event("tee", FeedbackKind::Neutral), &items, now());

        let before: Vec<f64> = weights.iter().map(|entry| entry.confidence).collect();
        let after: Vec<f64> = after.iter().map(|entry| entry.confidence).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn repeated_likes_clamp_at_one() {
        let learner = FeedbackLearner::default();
        let items = wardrobe();
        let mut weights = LearnedWeights::new();
        for _ in 0..20 {
            weights = learner.apply_feedback(&weights, &event("tee", FeedbackKind::Like), &items, now());
        }

        assert_eq!(weights.len(), 3);
        assert!(weights.iter().all(|entry| entry.confidence == 1.0));
    }

    #[test]
    fn repeated_dislikes_clamp_at_zero() {
        let learner = FeedbackLearner::default();
        let items = wardrobe();
        let mut weights = LearnedWeights::new();
        for _ in 0..12 {
            weights = learner.apply_feedback(&weights, &event("jeans", FeedbackKind::Dislike), &items, now());
        }

        assert!(weights.iter().all(|entry| entry.confidence == 0.0));
    }

    #[test]
    fn order_of_like_and_dislike_matters_at_the_bounds() {
        let learner = FeedbackLearner::default();
        let items = wardrobe();

        let mut likes_first = LearnedWeights::new();
        for _ in 0..10 {
            learner.apply_in_place(&mut likes_first, &event("tee", FeedbackKind::Like), &items, now());
        }
        learner.apply_in_place(&mut likes_first, &event("tee", FeedbackKind::Dislike), &items, now());

        let mut dislike_first = LearnedWeights::new();
        learner.apply_in_place(&mut dislike_first, &event("tee", FeedbackKind::Dislike), &items, now());
        for _ in 0..10 {
            learner.apply_in_place(&mut dislike_first, &event("tee", FeedbackKind::Like), &items, now());
        }

        let a = likes_first.confidence(PreferenceDimension::Category, "Tops").unwrap();
        let b = dislike_first.confidence(PreferenceDimension::Category, "Tops").unwrap();
        assert!((a - 0.9).abs() < 1e-9);
        assert_eq!(b, 1.0);
    }

    #[test]
    fn unknown_item_leaves_weights_unchanged() {
        let learner = FeedbackLearner::default();
        let items = wardrobe();
        let weights = learner.apply_feedback(&LearnedWeights::new(), &event("tee", FeedbackKind::Like), &items, now());

        let mut in_place = weights.clone();
        let applied = learner.apply_in_place(&mut in_place, &event("ghost", FeedbackKind::Like), &items, now());

        assert!(!applied);
        assert_eq!(in_place, weights);
        assert_eq!(learner.apply_feedback(&weights, &event("ghost", FeedbackKind::Dislike), &items, now()), weights);
    }

    #[test]
    fn keys_match_case_insensitively() {
        let learner = FeedbackLearner::default();
        let mut items = wardrobe();
        let mut weights = LearnedWeights::new();
        learner.apply_in_place(&mut weights, &event("tee", FeedbackKind::Like), &items, now());

        items[0].color = "WHITE".to_string();
        learner.apply_in_place(&mut weights, &event("tee", FeedbackKind::Like), &items, now());

        assert_eq!(weights.len(), 3);
        let color = weights.confidence(PreferenceDimension::Color, "white").unwrap();
        assert!((color - 0.7).abs() < 1e-9);
    }

    #[test]
    fn item_confidence_averages_known_keys() {
        let learner = FeedbackLearner::default();
        let items = wardrobe();
        let mut weights = LearnedWeights::new();
        assert_eq!(weights.item_confidence(&items[0]), None);

        learner.apply_in_place(&mut weights, &event("tee", FeedbackKind::Like), &items, now());
        learner.apply_in_place(&mut weights, &event("jeans", FeedbackKind::Dislike), &items, now());

        let tee = weights.item_confidence(&items[0]).unwrap();
        let jeans = weights.item_confidence(&items[1]).unwrap();
        assert!((tee - 0.6).abs() < 1e-9);
        assert!((jeans - 0.4).abs() < 1e-9);
    }

    #[test]
    fn accuracy_counts_likes_within_window() {
        let history = vec![
            event("tee", FeedbackKind::Like),
            event("tee", FeedbackKind::Like),
            event("jeans", FeedbackKind::Dislike),
        ];

        let value = accuracy(&history, 30, now());
        assert!((value - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn accuracy_ignores_feedback_outside_window() {
        let old = FeedbackEvent::new("tee", FeedbackKind::Dislike, now() - Duration::days(45));
        let history = vec![old, event("tee", FeedbackKind::Like)];

        assert_eq!(accuracy(&history, 30, now()), 1.0);
    }

    #[test]
    fn accuracy_of_empty_window_is_zero() {
        assert_eq!(accuracy(&[], 30, now()), 0.0);

        let stale = vec![FeedbackEvent::new("tee", FeedbackKind::Like, now() - Duration::days(90))];
        assert_eq!(accuracy(&stale, 30, now()), 0.0);
    }
}
