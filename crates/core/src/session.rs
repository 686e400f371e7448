//! Per-user preference state.
//!
//! A [`WardrobeSession`] owns one user's profile, learned weights, feedback
//! history, stored locations and style snapshots. Nothing is shared between
//! users. [`SessionRegistry`] hands out one lock per user so concurrent
//! updates to the same user are serialized while different users never
//! contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::domain::feedback::FeedbackEvent;
use crate::domain::item::ClothingItem;
use crate::domain::preferences::PreferenceProfile;
use crate::domain::weather::WeatherContext;
use crate::learning::{accuracy, track_style_evolution, FeedbackLearner, LearnedWeights, StyleEvolutionEntry};
use crate::location::{ClimateModel, LocationPreference, LocationRecommendation};
use crate::recommendation::{RecommendationEngine, RecommendationRequest};

/// Serializable part of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceState {
    pub profile: Option<PreferenceProfile>,
    pub learned_weights: LearnedWeights,
    pub feedback_history: Vec<FeedbackEvent>,
    pub location_preferences: Vec<LocationPreference>,
    pub style_evolution: Vec<StyleEvolutionEntry>,
}

#[derive(Debug, Clone)]
pub struct WardrobeSession {
    user_id: String,
    state: PreferenceState,
    engine: RecommendationEngine,
    learner: FeedbackLearner,
    climate: ClimateModel,
    accuracy_window_days: i64,
    default_limit: usize,
}

impl WardrobeSession {
    pub fn new(user_id: impl Into<String>, config: &AppConfig) -> Self {
        Self::from_state(user_id, PreferenceState::default(), config)
    }

    pub fn from_state(user_id: impl Into<String>, state: PreferenceState, config: &AppConfig) -> Self {
        Self {
            user_id: user_id.into(),
            state,
            engine: RecommendationEngine::from_config(config),
            learner: FeedbackLearner::new(config.learning.learning_rate),
            climate: ClimateModel::new(config.climate),
            accuracy_window_days: config.learning.accuracy_window_days,
            default_limit: config.recommendation.default_limit,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    pub fn into_state(self) -> PreferenceState {
        self.state
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn profile(&self) -> Option<&PreferenceProfile> {
        self.state.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Option<PreferenceProfile>) {
        self.state.profile = profile;
    }

    pub fn learned_weights(&self) -> &LearnedWeights {
        &self.state.learned_weights
    }

    pub fn location_preferences(&self) -> &[LocationPreference] {
        &self.state.location_preferences
    }

    /// Request pre-filled with this user's profile, learned weights and the
    /// configured default limit.
    pub fn request(&self, now: DateTime<Utc>) -> RecommendationRequest<'_> {
        RecommendationRequest::new(now)
            .with_profile(self.state.profile.as_ref())
            .with_learned_weights(&self.state.learned_weights)
            .with_limit(self.default_limit)
    }

    /// Applies feedback and appends it to the history. Feedback for an item
    /// not in `items` changes nothing and returns false.
    pub fn record_feedback(&mut self, event: FeedbackEvent, items: &[ClothingItem], now: DateTime<Utc>) -> bool {
        let applied = self.learner.apply_in_place(&mut self.state.learned_weights, &event, items, now);
        if applied {
            self.state.feedback_history.push(event);
        }
        applied
    }

    pub fn accuracy(&self, now: DateTime<Utc>) -> f64 {
        accuracy(&self.state.feedback_history, self.accuracy_window_days, now)
    }

    pub fn location_recommendation(
        &self,
        location: &str,
        region: &str,
        country: &str,
        weather: Option<&WeatherContext>,
        now: DateTime<Utc>,
    ) -> LocationRecommendation {
        self.climate.recommend(location, region, country, weather, &self.state.location_preferences, now)
    }

    /// Stores `preference`, replacing any entry for the same place.
    pub fn remember_location(&mut self, preference: LocationPreference) {
        let existing = self
            .state
            .location_preferences
            .iter()
            .position(|stored| stored.matches(&preference.location, &preference.region));
        match existing {
            Some(index) => self.state.location_preferences[index] = preference,
            None => self.state.location_preferences.push(preference),
        }
    }

    pub fn snapshot_style(&mut self, items: &[ClothingItem], now: DateTime<Utc>) -> &StyleEvolutionEntry {
        self.state.style_evolution.push(track_style_evolution(items, now));
        let last = self.state.style_evolution.len() - 1;
        &self.state.style_evolution[last]
    }
}

/// One independently locked session per user id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    config: AppConfig,
    sessions: Mutex<HashMap<String, Arc<Mutex<WardrobeSession>>>>,
}

impl SessionRegistry {
    pub fn new(config: AppConfig) -> Self {
        Self { config, sessions: Mutex::new(HashMap::new()) }
    }

    /// The user's session, created empty on first use.
    pub fn session(&self, user_id: &str) -> Arc<Mutex<WardrobeSession>> {
        let mut sessions = match self.sessions.lock() {
            Ok(sessions) => sessions,
            Err(poisoned) => poisoned.into_inner(),
        };
        sessions
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(WardrobeSession::new(user_id, &self.config))))
            .clone()
    }

    /// Registers a session restored from stored state, replacing any live one.
    pub fn restore(&self, user_id: &str, state: PreferenceState) -> Arc<Mutex<WardrobeSession>> {
        let session = Arc::new(Mutex::new(WardrobeSession::from_state(user_id, state, &self.config)));
        let mut sessions = match self.sessions.lock() {
            Ok(sessions) => sessions,
            Err(poisoned) => poisoned.into_inner(),
        };
        sessions.insert(user_id.to_string(), Arc::clone(&session));
        session
    }

    /// Runs `f` while holding only this user's lock.
    pub fn with_session<T>(&self, user_id: &str, f: impl FnOnce(&mut WardrobeSession) -> T) -> T {
        let session = self.session(user_id);
        let mut guard = match session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    pub fn len(&self) -> usize {
        match self.sessions.lock() {
            Ok(sessions) => sessions.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::TimeZone;

    use super::*;
    use crate::domain::feedback::FeedbackKind;
    use crate::domain::season::Season;
    use crate::learning::PreferenceDimension;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap()
    }

    fn items() -> Vec<ClothingItem> {
        vec![ClothingItem::new("tee", "Tops", "White", vec![Season::AllSeasons], now())]
    }

    #[test]
    fn feedback_updates_weights_and_history() {
        let mut session = WardrobeSession::new("ada", &AppConfig::default());

        assert!(session.record_feedback(FeedbackEvent::new("tee", FeedbackKind::Like, now()), &items(), now()));
        assert!(!session.record_feedback(FeedbackEvent::new("ghost", FeedbackKind::Like, now()), &items(), now()));

        assert_eq!(session.state().feedback_history.len(), 1);
        assert_eq!(session.learned_weights().len(), 2);
        assert_eq!(session.accuracy(now()), 1.0);
    }

    #[test]
    fn learning_rate_comes_from_config() {
        let mut config = AppConfig::default();
        config.learning.learning_rate = 0.25;
        let mut session = WardrobeSession::new("ada", &config);

        session.record_feedback(FeedbackEvent::new("tee", FeedbackKind::Like, now()), &items(), now());

        let confidence = session.learned_weights().confidence(PreferenceDimension::Color, "white").unwrap();
        assert!((confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn remembered_locations_replace_by_place() {
        let mut session = WardrobeSession::new("ada", &AppConfig::default());
        let inferred = session.location_recommendation("Oslo", "Nordic", "Norway", None, now()).location;
        session.remember_location(inferred.clone());

        let mut updated = inferred;
        updated.confidence = 0.9;
        session.remember_location(updated);

        assert_eq!(session.location_preferences().len(), 1);
        assert_eq!(session.location_preferences()[0].confidence, 0.9);
        let again = session.location_recommendation("Oslo", "", "", None, now());
        assert_eq!(again.location.confidence, 0.9);
    }

    #[test]
    fn style_snapshots_accumulate() {
        let mut session = WardrobeSession::new("ada", &AppConfig::default());

        session.snapshot_style(&items(), now());
        let latest = session.snapshot_style(&items(), now()).clone();

        assert_eq!(session.state().style_evolution.len(), 2);
        assert_eq!(latest.dominant_colors, vec!["White".to_string()]);
    }

    #[test]
    fn request_carries_profile_and_limit() {
        let mut config = AppConfig::default();
        config.recommendation.default_limit = 2;
        let mut session = WardrobeSession::new("ada", &config);
        session.set_profile(Some(PreferenceProfile::new("Casual", "Relaxed")));

        let request = session.request(now());

        assert_eq!(request.limit, 2);
        assert!(request.profile.is_some());
        assert!(request.learned.is_some());
    }

    #[test]
    fn registry_isolates_users() {
        let registry = SessionRegistry::new(AppConfig::default());

        registry.with_session("ada", |session| {
            session.record_feedback(FeedbackEvent::new("tee", FeedbackKind::Like, now()), &items(), now())
        });

        assert_eq!(registry.len(), 1);
        assert!(registry.with_session("grace", |session| session.learned_weights().is_empty()));
        assert_eq!(registry.with_session("ada", |session| session.learned_weights().len()), 2);
    }

    #[test]
    fn registry_serializes_updates_per_user() {
        let registry = Arc::new(SessionRegistry::new(AppConfig::default()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.with_session("ada", |session| {
                        session.record_feedback(FeedbackEvent::new("tee", FeedbackKind::Like, now()), &items(), now())
                    })
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }

        assert_eq!(registry.with_session("ada", |session| session.state().feedback_history.len()), 8);
    }

    #[test]
    fn restored_state_is_served() {
        let registry = SessionRegistry::new(AppConfig::default());
        let state = PreferenceState {
            profile: Some(PreferenceProfile::new("Classic", "Tailored")),
            ..PreferenceState::default()
        };

        registry.restore("ada", state);

        assert!(registry.with_session("ada", |session| session.profile().is_some()));
    }
}
