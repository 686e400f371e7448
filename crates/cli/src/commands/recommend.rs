use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use wardrobe_core::config::AppConfig;
use wardrobe_core::recommendation::ScoredOutfit;

use crate::commands::{load_state, session_for, CommandResult, WeatherArgs};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long, help = "Wardrobe state JSON file")]
    pub state: PathBuf,
    #[arg(long, help = "Occasion to dress for, e.g. work or party")]
    pub occasion: Option<String>,
    #[command(flatten)]
    pub weather: WeatherArgs,
    #[arg(long, requires = "region", help = "Location name for climate scoring")]
    pub location: Option<String>,
    #[arg(long, requires = "location", help = "Region for climate scoring")]
    pub region: Option<String>,
    #[arg(long, help = "Maximum number of outfits to return")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendOutput {
    cold_start: bool,
    recommendations: Vec<ScoredOutfit>,
}

pub fn run(config: &AppConfig, args: &RecommendArgs, now: DateTime<Utc>) -> CommandResult {
    let state = match load_state(COMMAND, &args.state) {
        Ok(state) => state,
        Err(failure) => return failure,
    };

    let session = session_for(config, &state);
    let weather = args.weather.to_context();

    let mut request =
        session.request(now).with_weather(weather.as_ref()).with_occasion(args.occasion.as_deref());
    if let (Some(location), Some(region)) = (&args.location, &args.region) {
        request = request.at_location(location, region, session.location_preferences());
    }
    if let Some(limit) = args.limit {
        request = request.with_limit(limit);
    }

    let recommendations = session.engine().rank(&state.outfits, &state.items, &request);
    let output = RecommendOutput { cold_start: session.profile().is_none(), recommendations };

    CommandResult::success_with_data(
        COMMAND,
        format!("{} outfit(s) recommended", output.recommendations.len()),
        output,
    )
}
