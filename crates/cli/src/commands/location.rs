use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use wardrobe_core::config::AppConfig;
use wardrobe_core::domain::weather::WeatherGuidance;
use wardrobe_core::location::LocationRecommendation;

use crate::commands::{load_state, save_state, session_for, CommandResult, WeatherArgs};
use crate::state::WardrobeState;

const COMMAND: &str = "location";

#[derive(Debug, Clone, Args)]
pub struct LocationArgs {
    #[arg(long, help = "Location name, e.g. Oslo")]
    pub location: String,
    #[arg(long, default_value = "", help = "Region, e.g. Northern Europe")]
    pub region: String,
    #[arg(long, default_value = "", help = "Country")]
    pub country: String,
    #[command(flatten)]
    pub weather: WeatherArgs,
    #[arg(long, help = "Wardrobe state JSON file with stored locations")]
    pub state: Option<PathBuf>,
    #[arg(long, requires = "state", help = "Store the resolved location in the state file")]
    pub remember: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationOutput {
    recommendation: LocationRecommendation,
    weather_guidance: Option<WeatherGuidance>,
}

pub fn run(config: &AppConfig, args: &LocationArgs, now: DateTime<Utc>) -> CommandResult {
    let mut state = match &args.state {
        Some(path) => match load_state(COMMAND, path) {
            Ok(state) => state,
            Err(failure) => return failure,
        },
        None => WardrobeState::default(),
    };

    let weather = args.weather.to_context();
    let mut session = session_for(config, &state);
    let recommendation =
        session.location_recommendation(&args.location, &args.region, &args.country, weather.as_ref(), now);

    if let (true, Some(path)) = (args.remember, &args.state) {
        session.remember_location(recommendation.location.clone());
        state.preferences = session.into_state();
        if let Err(failure) = save_state(COMMAND, path, &state) {
            return failure;
        }
    }

    let message = format!("{}: {}", args.location, recommendation.reasoning);
    let output = LocationOutput { recommendation, weather_guidance: weather.map(|weather| weather.guidance()) };
    CommandResult::success_with_data(COMMAND, message, output)
}
