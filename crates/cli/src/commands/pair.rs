use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use wardrobe_core::config::AppConfig;

use crate::commands::{load_state, session_for, CommandResult};

const COMMAND: &str = "pair";

#[derive(Debug, Clone, Args)]
pub struct PairArgs {
    #[arg(long, help = "Wardrobe state JSON file")]
    pub state: PathBuf,
    #[arg(long, help = "Anchor item id (Tops or Bottoms)")]
    pub item: String,
    #[arg(long, help = "Occasion to dress for")]
    pub occasion: Option<String>,
}

pub fn run(config: &AppConfig, args: &PairArgs, now: DateTime<Utc>) -> CommandResult {
    let state = match load_state(COMMAND, &args.state) {
        Ok(state) => state,
        Err(failure) => return failure,
    };
    if state.item(&args.item).is_none() {
        return CommandResult::unknown_entity(COMMAND, "item", &args.item);
    }

    let session = session_for(config, &state);
    let request = session.request(now).with_occasion(args.occasion.as_deref());
    let pairings = session.engine().suggest_pairings(&args.item, &state.items, &request);

    CommandResult::success_with_data(
        COMMAND,
        format!("{} pairing(s) for `{}`", pairings.len(), args.item),
        pairings,
    )
}
