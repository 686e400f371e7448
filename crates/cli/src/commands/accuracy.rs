use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use wardrobe_core::config::AppConfig;
use wardrobe_core::learning;

use crate::commands::{load_state, CommandResult};

const COMMAND: &str = "accuracy";

#[derive(Debug, Clone, Args)]
pub struct AccuracyArgs {
    #[arg(long, help = "Wardrobe state JSON file")]
    pub state: PathBuf,
    #[arg(long, help = "Trailing window in days (defaults to learning.accuracy_window_days)")]
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccuracyOutput {
    accuracy: f64,
    window_days: i64,
    total_feedback: usize,
}

pub fn run(config: &AppConfig, args: &AccuracyArgs, now: DateTime<Utc>) -> CommandResult {
    let state = match load_state(COMMAND, &args.state) {
        Ok(state) => state,
        Err(failure) => return failure,
    };

    let window_days = args.days.unwrap_or(config.learning.accuracy_window_days);
    let history = &state.preferences.feedback_history;
    let accuracy = learning::accuracy(history, window_days, now);

    CommandResult::success_with_data(
        COMMAND,
        format!("{:.0}% liked over the last {window_days} day(s)", accuracy * 100.0),
        AccuracyOutput { accuracy, window_days, total_feedback: history.len() },
    )
}
