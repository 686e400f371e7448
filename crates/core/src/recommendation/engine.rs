//! Recommendation engine implementation

use tracing::debug;

use super::scoring::{CompatibilityScorer, ScoringWeights};
use super::types::*;
use super::{DEFAULT_MAX_REASONS, DEFAULT_WEIGHTS, MAX_PAIRINGS, NEUTRAL_SCORE};
use crate::config::AppConfig;
use crate::domain::item::ClothingItem;
use crate::domain::outfit::Outfit;
use crate::domain::preferences::PreferenceProfile;
use crate::domain::season::Season;

/// Ranks outfits for one user's context.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    scorer: CompatibilityScorer,
    max_reasons: usize,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHTS, DEFAULT_MAX_REASONS)
    }
}

impl RecommendationEngine {
    pub fn new(weights: ScoringWeights, max_reasons: usize) -> Self {
        Self { scorer: CompatibilityScorer::with_weights(weights), max_reasons }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.weights, config.recommendation.max_reasons)
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    /// Ranks `outfits` best first and keeps at most `request.limit`.
    ///
    /// Without a profile the result is a pure recency ordering. With one,
    /// outfits holding any disliked color are dropped before scoring and the
    /// rest are ordered by composite score, ties going to the more recent
    /// outfit.
    pub fn rank(
        &self,
        outfits: &[Outfit],
        items: &[ClothingItem],
        request: &RecommendationRequest<'_>,
    ) -> Vec<ScoredOutfit> {
        let Some(profile) = request.profile else {
            return self.rank_by_recency(outfits, request.limit);
        };

        let mut excluded = 0usize;
        let mut ranked = Vec::with_capacity(outfits.len());
        for outfit in outfits {
            let members = outfit.resolve_items(items);
            if members.iter().any(|item| profile.is_color_disliked(&item.color)) {
                excluded += 1;
                continue;
            }

            let (score, components) = self.score_members(&members, profile, request);
            ranked.push(ScoredOutfit {
                outfit: outfit.clone(),
                score,
                confidence: ConfidenceLevel::from_score(score),
                reasons: Vec::new(),
                components,
            });
        }

        ranked.sort_by(|a, b| {
            b.score.total_cmp(&a.score).then_with(|| b.outfit.recency().cmp(&a.outfit.recency()))
        });
        ranked.truncate(request.limit);

        for scored in &mut ranked {
            let members = scored.outfit.resolve_items(items);
            scored.reasons = self.collect_reasons(profile, &members, request.occasion);
        }

        debug!(
            event_name = "recommendation.ranked",
            candidates = outfits.len(),
            excluded,
            returned = ranked.len(),
            occasion = request.occasion.unwrap_or_default(),
            "outfits ranked"
        );

        ranked
    }

    fn rank_by_recency(&self, outfits: &[Outfit], limit: usize) -> Vec<ScoredOutfit> {
        let mut ordered: Vec<&Outfit> = outfits.iter().collect();
        ordered.sort_by(|a, b| b.recency().cmp(&a.recency()));
        ordered.truncate(limit);

        debug!(
            event_name = "recommendation.cold_start",
            candidates = outfits.len(),
            returned = ordered.len(),
            "no preference profile; ordering by recency"
        );

        ordered
            .into_iter()
            .map(|outfit| ScoredOutfit {
                outfit: outfit.clone(),
                score: NEUTRAL_SCORE,
                confidence: ConfidenceLevel::from_score(NEUTRAL_SCORE),
                reasons: Vec::new(),
                components: None,
            })
            .collect()
    }

    /// Composite score of resolved members. No members scores neutral.
    fn score_members(
        &self,
        members: &[&ClothingItem],
        profile: &PreferenceProfile,
        request: &RecommendationRequest<'_>,
    ) -> (f64, Option<ComponentScores>) {
        if members.is_empty() {
            return (NEUTRAL_SCORE, None);
        }

        let style = members
            .iter()
            .map(|item| self.scorer.learned_style_score(item, profile, request.learned))
            .sum::<f64>()
            / members.len() as f64;

        let components = ComponentScores {
            style,
            weather: self.scorer.outfit_weather_score(members, request.weather),
            occasion: request.occasion.map(|occasion| self.scorer.occasion_score(members, occasion)),
            location: request.location_context().map(|(location, region, known)| {
                self.scorer.location_score(members, location, region, known, request.now)
            }),
        };

        (self.scorer.calculate_total_score(&components), Some(components))
    }

    /// Positive signals in evaluation order, deduplicated and capped.
    fn collect_reasons(
        &self,
        profile: &PreferenceProfile,
        members: &[&ClothingItem],
        occasion: Option<&str>,
    ) -> Vec<String> {
        let mut reasons: Vec<String> = Vec::new();
        for item in members {
            for reason in item_reasons(profile, item, occasion) {
                if reasons.len() == self.max_reasons {
                    return reasons;
                }
                if !reasons.contains(&reason) {
                    reasons.push(reason);
                }
            }
        }
        reasons
    }

    /// Explains how well one outfit fits the profile.
    pub fn score_outfit_compatibility(
        &self,
        outfit: &Outfit,
        items: &[ClothingItem],
        request: &RecommendationRequest<'_>,
    ) -> CompatibilityReport {
        let neutral = CompatibilityReport { score: NEUTRAL_SCORE, feedback: Vec::new(), improvements: Vec::new() };
        let Some(profile) = request.profile else {
            return neutral;
        };
        let members = outfit.resolve_items(items);
        if members.is_empty() {
            return neutral;
        }

        let mut total = 0.0;
        let mut feedback = Vec::new();
        let mut improvements = Vec::new();

        for item in &members {
            total += self.scorer.learned_style_score(item, profile, request.learned);
            let name = item.display_name();

            if profile.is_color_disliked(&item.color) {
                improvements.push(format!("Consider replacing {name} with a preferred color"));
            } else if profile.is_color_favored(&item.color) {
                feedback.push(format!(
                    "{name} matches your preferred {} color palette",
                    item.color.to_lowercase()
                ));
            }

            if profile.matches_style(&item.tags) {
                feedback.push(format!("{name} aligns with your {} style", profile.style_profile));
            }
            if profile.matches_fit(&item.tags) {
                feedback.push(format!(
                    "{name} matches your preferred {} fit",
                    profile.preferred_fit.to_lowercase()
                ));
            }

            if let Some(weather) = request.weather {
                if self.scorer.season_weather_score(item, Some(weather), Some(profile)) < NEUTRAL_SCORE {
                    improvements.push(format!(
                        "{name} is not ideal for {} weather",
                        weather.descriptor().label()
                    ));
                }
            }
        }

        let score = total / members.len() as f64;
        if score < 0.4 {
            improvements.push("This outfit may not align well with your style preferences".to_string());
        } else if score > 0.8 {
            feedback.push("This outfit is highly compatible with your preferences!".to_string());
        }

        CompatibilityReport { score, feedback, improvements }
    }

    /// Builds up to three outfits around a Tops or Bottoms anchor, pairing it
    /// with the complementary category and footwear. Companions share a
    /// season with the anchor, pass the profile's filters and are taken in
    /// style-score order. Other anchors and unknown ids yield nothing.
    pub fn suggest_pairings(
        &self,
        anchor_id: &str,
        items: &[ClothingItem],
        request: &RecommendationRequest<'_>,
    ) -> Vec<ScoredOutfit> {
        let Some(anchor) = items.iter().find(|item| item.id == anchor_id) else {
            return Vec::new();
        };
        let complement = if anchor.is_category("Tops") {
            "Bottoms"
        } else if anchor.is_category("Bottoms") {
            "Tops"
        } else {
            return Vec::new();
        };

        let candidates = items.iter().filter(|other| other.id != anchor.id && shares_season(anchor, other));
        let mut compatible: Vec<&ClothingItem> = match request.profile {
            Some(profile) => profile.filter_items(candidates),
            None => candidates.collect(),
        };
        if let Some(profile) = request.profile {
            compatible.sort_by(|a, b| {
                let a = self.scorer.learned_style_score(a, profile, request.learned);
                let b = self.scorer.learned_style_score(b, profile, request.learned);
                b.total_cmp(&a)
            });
        }

        let complements: Vec<&ClothingItem> =
            compatible.iter().copied().filter(|item| item.is_category(complement)).collect();
        let footwear: Vec<&ClothingItem> =
            compatible.iter().copied().filter(|item| item.is_category("Footwear")).collect();

        (0..MAX_PAIRINGS)
            .filter_map(|index| {
                let companions: Vec<&ClothingItem> =
                    [complements.get(index), footwear.get(index)].into_iter().flatten().copied().collect();
                if companions.is_empty() {
                    return None;
                }

                let mut members = vec![anchor];
                members.extend(companions.iter().copied());

                let score = match request.profile {
                    Some(profile) => {
                        members
                            .iter()
                            .map(|item| self.scorer.learned_style_score(item, profile, request.learned))
                            .sum::<f64>()
                            / members.len() as f64
                    }
                    None => NEUTRAL_SCORE,
                };
                let reasons = request
                    .profile
                    .map(|profile| self.collect_reasons(profile, &companions, request.occasion))
                    .unwrap_or_default();

                let mut outfit = Outfit::new(
                    format!("pairing-{}-{index}", anchor.id),
                    members.iter().map(|item| item.id.clone()).collect(),
                )
                .with_created_at(request.now);
                outfit.name = format!("Pairing {} with {}", index + 1, anchor.display_name());
                outfit.seasons = anchor.seasons.clone();
                if let Some(occasion) = request.occasion {
                    outfit.occasion = occasion.to_string();
                }

                Some(ScoredOutfit {
                    outfit,
                    score,
                    confidence: ConfidenceLevel::from_score(score),
                    reasons,
                    components: None,
                })
            })
            .collect()
    }
}

fn shares_season(anchor: &ClothingItem, other: &ClothingItem) -> bool {
    anchor.seasons.contains(&Season::AllSeasons)
        || anchor.seasons.iter().any(|season| other.fits_season(*season))
}

fn item_reasons(profile: &PreferenceProfile, item: &ClothingItem, occasion: Option<&str>) -> Vec<String> {
    let mut reasons = Vec::new();

    if profile.is_color_favored(&item.color) {
        reasons.push(format!("Matches your preferred {} color palette", item.color.to_lowercase()));
    }
    if profile.matches_style(&item.tags) {
        reasons.push(format!("Fits your {} style profile", profile.style_profile));
    }
    if profile.matches_fit(&item.tags) {
        reasons.push(format!("Matches your preferred {} fit", profile.preferred_fit.to_lowercase()));
    }
    if let Some(occasion) = occasion.filter(|occasion| profile.cares_about_occasion(occasion)) {
        reasons.push(format!("Perfect for {} occasions", occasion.to_lowercase()));
    }
    if profile.matches_activity(&item.tags) {
        reasons.push(format!(
            "Suitable for your {} activity level",
            profile.activity_level.label().to_lowercase()
        ));
    }
    if profile.matches_sustainability(&item.tags) {
        reasons.push("Aligns with your sustainability preferences".to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::domain::preferences::ActivityLevel;
    use crate::domain::weather::WeatherContext;
    use crate::location::LocationPreference;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 20, 7, 30, 0).unwrap()
    }

    fn item(id: &str, category: &str, color: &str, tags: &[&str]) -> ClothingItem {
        ClothingItem::new(id, category, color, vec![Season::AllSeasons], now())
            .with_name(id)
            .with_tags(tags)
    }

    fn outfit(id: &str, item_ids: &[&str]) -> Outfit {
        Outfit::new(id, item_ids.iter().map(|id| id.to_string()).collect())
    }

    fn ids(ranked: &[ScoredOutfit]) -> Vec<&str> {
        ranked.iter().map(|scored| scored.outfit.id.as_str()).collect()
    }

    #[test]
    fn without_profile_outfits_are_ordered_by_recency() {
        let engine = RecommendationEngine::default();
        let items = vec![item("tee", "Tops", "White", &[])];
        let outfits = vec![
            outfit("old", &["tee"]).with_created_at(now() - Duration::days(30)),
            outfit("worn", &["tee"])
                .with_created_at(now() - Duration::days(60))
                .with_last_worn(now() - Duration::days(1)),
            outfit("middle", &["tee"]).with_created_at(now() - Duration::days(10)),
        ];

        let ranked = engine.rank(&outfits, &items, &RecommendationRequest::new(now()));

        assert_eq!(ids(&ranked), vec!["worn", "middle", "old"]);
        assert!(ranked.iter().all(|scored| scored.score == NEUTRAL_SCORE && scored.components.is_none()));
    }

    #[test]
    fn cold_start_ignores_context_and_respects_limit() {
        let engine = RecommendationEngine::default();
        let weather = WeatherContext::new(30.0, 0.0);
        let outfits = vec![
            outfit("undated", &[]),
            outfit("a", &[]).with_created_at(now() - Duration::days(2)),
            outfit("b", &[]).with_created_at(now() - Duration::days(1)),
        ];
        let request = RecommendationRequest::new(now()).with_weather(Some(&weather)).with_limit(2);

        assert_eq!(ids(&engine.rank(&outfits, &[], &request)), vec!["b", "a"]);
    }

    #[test]
    fn outfits_with_disliked_colors_are_excluded() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Casual", "Relaxed").with_disliked_colors(&["Red"]);
        let items = vec![
            item("red-tee", "Tops", "red", &["casual", "relaxed"]),
            item("jeans", "Bottoms", "Blue", &[]),
        ];
        let outfits = vec![outfit("with-red", &["red-tee", "jeans"]), outfit("plain", &["jeans"])];

        let ranked = engine.rank(&outfits, &items, &RecommendationRequest::new(now()).with_profile(Some(&profile)));

        assert_eq!(ids(&ranked), vec!["plain"]);
    }

    #[test]
    fn warm_layer_lifts_cold_work_outfit() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Casual", "Relaxed");
        let items = vec![
            item("coat", "Outerwear", "Grey", &[]),
            item("shirt", "Tops", "White", &["business"]),
        ];
        let outfits = vec![outfit("shirt-only", &["shirt"]), outfit("layered", &["coat", "shirt"])];
        let weather = WeatherContext::new(5.0, 0.0);
        let request = RecommendationRequest::new(now())
            .with_profile(Some(&profile))
            .with_weather(Some(&weather))
            .with_occasion(Some("Work"));

        let ranked = engine.rank(&outfits, &items, &request);

        assert_eq!(ids(&ranked), vec!["layered", "shirt-only"]);
        let layered = ranked[0].components.as_ref().unwrap();
        assert_eq!(layered.occasion, Some(0.8));
        assert!(layered.weather >= 0.5);
        assert_eq!(layered.location, None);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn fully_dangling_outfit_scores_neutral() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Casual", "Relaxed");
        let outfits = vec![outfit("ghost", &["missing-1", "missing-2"])];

        let ranked = engine.rank(&outfits, &[], &RecommendationRequest::new(now()).with_profile(Some(&profile)));

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, NEUTRAL_SCORE);
        assert!(ranked[0].reasons.is_empty());
    }

    #[test]
    fn empty_outfit_list_is_empty_result() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Casual", "Relaxed");

        assert!(engine.rank(&[], &[], &RecommendationRequest::new(now()).with_profile(Some(&profile))).is_empty());
        assert!(engine.rank(&[], &[], &RecommendationRequest::new(now())).is_empty());
    }

    #[test]
    fn equal_scores_prefer_recent_outfits() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Casual", "Relaxed");
        let items = vec![item("tee", "Tops", "White", &[])];
        let outfits = vec![
            outfit("older", &["tee"]).with_created_at(now() - Duration::days(9)),
            outfit("newer", &["tee"]).with_last_worn(now() - Duration::days(1)),
        ];

        let ranked = engine.rank(&outfits, &items, &RecommendationRequest::new(now()).with_profile(Some(&profile)));

        assert_eq!(ids(&ranked), vec!["newer", "older"]);
    }

    #[test]
    fn reasons_are_deduplicated_ordered_and_capped() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Minimalist", "Fitted")
            .with_liked_colors(&["Black"])
            .with_occasions(&["Work"])
            .with_activity_level(ActivityLevel::Low);
        let items = vec![
            item("a", "Tops", "Black", &["minimalist"]),
            item("b", "Bottoms", "Black", &["minimalist", "fitted", "comfortable"]),
        ];
        let outfits = vec![outfit("look", &["a", "b"])];
        let request = RecommendationRequest::new(now()).with_profile(Some(&profile)).with_occasion(Some("Work"));

        let ranked = engine.rank(&outfits, &items, &request);

        assert_eq!(
            ranked[0].reasons,
            vec![
                "Matches your preferred black color palette".to_string(),
                "Fits your Minimalist style profile".to_string(),
                "Perfect for work occasions".to_string(),
            ]
        );
    }

    #[test]
    fn location_component_needs_full_context() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Casual", "Relaxed");
        let items = vec![item("tee", "Tops", "White", &[])];
        let outfits = vec![outfit("look", &["tee"])];
        let known: Vec<LocationPreference> = Vec::new();

        let ranked = engine.rank(
            &outfits,
            &items,
            &RecommendationRequest::new(now()).with_profile(Some(&profile)).at_location("Lima", "Andes", &known),
        );

        let components = ranked[0].components.as_ref().unwrap();
        assert_eq!(components.location, Some(0.5));
        assert_eq!(components.occasion, None);
    }

    #[test]
    fn compatibility_report_explains_matches_and_gaps() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Minimalist", "Fitted")
            .with_liked_colors(&["Black"])
            .with_disliked_colors(&["Orange"]);
        let items = vec![
            item("Black Tee", "Tops", "Black", &["minimalist", "fitted"]),
            ClothingItem::new("Orange Shorts", "Shorts", "Orange", vec![Season::Summer], now())
                .with_name("Orange Shorts"),
        ];
        let look = outfit("look", &["Black Tee", "Orange Shorts"]);
        let snow = WeatherContext::new(-1.0, 0.0).with_description("snow");
        let request = RecommendationRequest::new(now()).with_profile(Some(&profile)).with_weather(Some(&snow));

        let report = engine.score_outfit_compatibility(&look, &items, &request);

        assert!((report.score - 0.75).abs() < 1e-9);
        assert_eq!(
            report.feedback,
            vec![
                "Black Tee matches your preferred black color palette".to_string(),
                "Black Tee aligns with your Minimalist style".to_string(),
                "Black Tee matches your preferred fitted fit".to_string(),
            ]
        );
        assert_eq!(
            report.improvements,
            vec![
                "Consider replacing Orange Shorts with a preferred color".to_string(),
                "Orange Shorts is not ideal for cold weather".to_string(),
            ]
        );
    }

    #[test]
    fn disliked_color_wins_over_liked_in_report_and_reasons() {
        let engine = RecommendationEngine::default();
        let profile =
            PreferenceProfile::new("Casual", "Relaxed").with_liked_colors(&["Red"]).with_disliked_colors(&["red"]);
        let items = vec![item("tee", "Tops", "Red", &[]).with_name("Red Tee")];
        let request = RecommendationRequest::new(now()).with_profile(Some(&profile));

        let report = engine.score_outfit_compatibility(&outfit("o", &["tee"]), &items, &request);

        assert!(report.feedback.is_empty());
        assert_eq!(report.improvements, vec!["Consider replacing Red Tee with a preferred color".to_string()]);
        assert!(item_reasons(&profile, &items[0], None).is_empty());
    }

    #[test]
    fn compatibility_report_without_profile_is_neutral() {
        let engine = RecommendationEngine::default();
        let items = vec![item("tee", "Tops", "White", &[])];

        let report = engine.score_outfit_compatibility(&outfit("o", &["tee"]), &items, &RecommendationRequest::new(now()));

        assert_eq!(report, CompatibilityReport { score: 0.5, feedback: vec![], improvements: vec![] });
    }

    #[test]
    fn pairings_combine_anchor_with_complements_and_footwear() {
        let engine = RecommendationEngine::default();
        let profile = PreferenceProfile::new("Casual", "Relaxed").with_avoid_patterns(&["plaid"]);
        let items = vec![
            item("tee", "Tops", "White", &[]),
            item("chinos", "Bottoms", "Beige", &[]),
            item("jeans", "Bottoms", "Blue", &["casual"]),
            item("kilt", "Bottoms", "Green", &["plaid"]),
            item("sneakers", "Footwear", "White", &[]),
            ClothingItem::new("shorts", "Bottoms", "Khaki", vec![Season::Summer], now()),
        ];
        let request = RecommendationRequest::new(now()).with_profile(Some(&profile));

        let pairings = engine.suggest_pairings("tee", &items, &request);

        assert_eq!(pairings.len(), 3);
        assert_eq!(pairings[0].outfit.item_ids, vec!["tee", "jeans", "sneakers"]);
        assert_eq!(pairings[1].outfit.item_ids, vec!["tee", "chinos"]);
        assert_eq!(pairings[2].outfit.item_ids, vec!["tee", "shorts"]);
        assert_eq!(pairings[0].reasons, vec!["Fits your Casual style profile".to_string()]);
        assert!((pairings[0].score - 0.6).abs() < 1e-9);
        assert_eq!(pairings[0].outfit.id, "pairing-tee-0");
    }

    #[test]
    fn pairings_need_known_tops_or_bottoms_anchor() {
        let engine = RecommendationEngine::default();
        let items = vec![item("boots", "Footwear", "Brown", &[]), item("jeans", "Bottoms", "Blue", &[])];
        let request = RecommendationRequest::new(now());

        assert!(engine.suggest_pairings("boots", &items, &request).is_empty());
        assert!(engine.suggest_pairings("ghost", &items, &request).is_empty());

        let footwear_only = engine.suggest_pairings("jeans", &items, &request);
        assert_eq!(footwear_only.len(), 1);
        assert_eq!(footwear_only[0].outfit.item_ids, vec!["jeans", "boots"]);
        assert_eq!(footwear_only[0].score, NEUTRAL_SCORE);
    }
}
