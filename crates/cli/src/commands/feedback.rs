use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tracing::warn;
use wardrobe_core::config::AppConfig;
use wardrobe_core::domain::feedback::{FeedbackContext, FeedbackEvent, FeedbackKind};
use wardrobe_core::learning::LearnedPreferenceWeight;

use crate::commands::{load_state, save_state, session_for, CommandResult, WeatherArgs};

const COMMAND: &str = "feedback";

#[derive(Debug, Clone, Args)]
pub struct FeedbackArgs {
    #[arg(long, help = "Wardrobe state JSON file")]
    pub state: PathBuf,
    #[arg(long, help = "Item the feedback is about")]
    pub item: String,
    #[arg(long, help = "like, dislike or neutral")]
    pub kind: FeedbackKind,
    #[arg(long, help = "Outfit the item was worn in")]
    pub outfit: Option<String>,
    #[arg(long)]
    pub occasion: Option<String>,
    #[arg(long)]
    pub mood: Option<String>,
    #[command(flatten)]
    pub weather: WeatherArgs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackOutput<'a> {
    item_id: &'a str,
    feedback: FeedbackKind,
    tracked_keys: usize,
    accuracy: f64,
    updated: Vec<&'a LearnedPreferenceWeight>,
}

pub fn run(config: &AppConfig, args: &FeedbackArgs, now: DateTime<Utc>) -> CommandResult {
    let mut state = match load_state(COMMAND, &args.state) {
        Ok(state) => state,
        Err(failure) => return failure,
    };

    let mut event = FeedbackEvent::new(&args.item, args.kind, now).with_context(FeedbackContext {
        occasion: args.occasion.clone(),
        weather: args.weather.to_context(),
        mood: args.mood.clone(),
    });
    if let Some(outfit) = &args.outfit {
        event = event.for_outfit(outfit);
    }

    let mut session = session_for(config, &state);
    if !session.record_feedback(event, &state.items, now) {
        warn!(
            event_name = "cli.feedback.ignored",
            item_id = %args.item,
            feedback = args.kind.as_str(),
            "feedback references an unknown item; weights unchanged"
        );
        return CommandResult::unknown_entity(COMMAND, "item", &args.item);
    }

    let accuracy = session.accuracy(now);
    state.preferences = session.into_state();
    if let Err(failure) = save_state(COMMAND, &args.state, &state) {
        return failure;
    }

    let updated = state.preferences.learned_weights.iter().filter(|entry| entry.last_updated == now).collect();
    let output = FeedbackOutput {
        item_id: &args.item,
        feedback: args.kind,
        tracked_keys: state.preferences.learned_weights.len(),
        accuracy,
        updated,
    };

    CommandResult::success_with_data(COMMAND, format!("recorded {} for `{}`", args.kind, args.item), output)
}
