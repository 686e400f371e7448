use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use wardrobe_core::domain::preferences::PersonalizedSuggestions;

use crate::commands::{load_state, CommandResult};

const COMMAND: &str = "suggest";

#[derive(Debug, Clone, Args)]
pub struct SuggestArgs {
    #[arg(long, help = "Wardrobe state JSON file")]
    pub state: PathBuf,
    #[arg(long, help = "Occasion to dress for, e.g. work or casual")]
    pub occasion: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestOutput {
    cold_start: bool,
    suggestions: PersonalizedSuggestions,
    styling_tips: Vec<String>,
}

pub fn run(args: &SuggestArgs) -> CommandResult {
    let state = match load_state(COMMAND, &args.state) {
        Ok(state) => state,
        Err(failure) => return failure,
    };

    let output = match &state.preferences.profile {
        Some(profile) => SuggestOutput {
            cold_start: false,
            suggestions: profile.personalized_suggestions(args.occasion.as_deref()),
            styling_tips: profile.styling_tips(),
        },
        None => SuggestOutput {
            cold_start: true,
            suggestions: PersonalizedSuggestions::without_profile(),
            styling_tips: Vec::new(),
        },
    };

    CommandResult::success_with_data(
        COMMAND,
        format!("{} styling tip(s)", output.styling_tips.len()),
        output,
    )
}
