use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use wardrobe_core::config::AppConfig;

use crate::commands::{load_state, session_for, CommandResult, WeatherArgs};

const COMMAND: &str = "analyze";

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    #[arg(long, help = "Wardrobe state JSON file")]
    pub state: PathBuf,
    #[arg(long, help = "Outfit id to explain")]
    pub outfit: String,
    #[command(flatten)]
    pub weather: WeatherArgs,
}

pub fn run(config: &AppConfig, args: &AnalyzeArgs, now: DateTime<Utc>) -> CommandResult {
    let state = match load_state(COMMAND, &args.state) {
        Ok(state) => state,
        Err(failure) => return failure,
    };
    let Some(outfit) = state.outfit(&args.outfit) else {
        return CommandResult::unknown_entity(COMMAND, "outfit", &args.outfit);
    };

    let session = session_for(config, &state);
    let weather = args.weather.to_context();
    let request = session.request(now).with_weather(weather.as_ref());
    let report = session.engine().score_outfit_compatibility(outfit, &state.items, &request);

    CommandResult::success_with_data(
        COMMAND,
        format!("outfit `{}` scores {:.0}%", outfit.id, report.score * 100.0),
        report,
    )
}
