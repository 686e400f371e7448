use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use wardrobe_core::config::AppConfig;

use crate::commands::{load_state, save_state, session_for, CommandResult};

const COMMAND: &str = "style";

#[derive(Debug, Clone, Args)]
pub struct StyleArgs {
    #[arg(long, help = "Wardrobe state JSON file")]
    pub state: PathBuf,
}

pub fn run(config: &AppConfig, args: &StyleArgs, now: DateTime<Utc>) -> CommandResult {
    let mut state = match load_state(COMMAND, &args.state) {
        Ok(state) => state,
        Err(failure) => return failure,
    };

    let mut session = session_for(config, &state);
    let entry = session.snapshot_style(&state.items, now).clone();
    state.preferences = session.into_state();
    if let Err(failure) = save_state(COMMAND, &args.state, &state) {
        return failure;
    }

    CommandResult::success_with_data(
        COMMAND,
        format!(
            "style snapshot #{}: {}",
            state.preferences.style_evolution.len(),
            entry.style_personality
        ),
        entry,
    )
}
