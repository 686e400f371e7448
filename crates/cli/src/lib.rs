pub mod commands;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use wardrobe_core::config::{AppConfig, LoadOptions};

use commands::accuracy::AccuracyArgs;
use commands::analyze::AnalyzeArgs;
use commands::feedback::FeedbackArgs;
use commands::location::LocationArgs;
use commands::pair::PairArgs;
use commands::recommend::RecommendArgs;
use commands::style::StyleArgs;
use commands::suggest::SuggestArgs;
use commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "wardrobe",
    about = "Wardrobe outfit recommendation CLI",
    long_about = "Rank outfits, explain compatibility, record feedback and inspect climate advice for a wardrobe state file.",
    after_help = "Examples:\n  wardrobe recommend --state wardrobe.json --occasion work --temperature 6\n  wardrobe feedback --state wardrobe.json --item tee-1 --kind like\n  wardrobe config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (defaults to wardrobe.toml or config/wardrobe.toml)")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Engine(EngineCommand),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

/// Subcommands that run against a loaded configuration.
#[derive(Debug, Subcommand)]
enum EngineCommand {
    #[command(about = "Rank outfits for the current weather, occasion and location")]
    Recommend(RecommendArgs),
    #[command(about = "Explain how well one outfit fits the stored style profile")]
    Analyze(AnalyzeArgs),
    #[command(about = "Suggest outfits built around one Tops or Bottoms item")]
    Pair(PairArgs),
    #[command(about = "Styles, colors, tags and styling tips for the stored profile")]
    Suggest(SuggestArgs),
    #[command(about = "Record like/dislike/neutral feedback and update learned weights")]
    Feedback(FeedbackArgs),
    #[command(about = "Share of liked feedback over a trailing window")]
    Accuracy(AccuracyArgs),
    #[command(about = "Climate-aware advice for a location")]
    Location(LocationArgs),
    #[command(about = "Append a style-evolution snapshot of the wardrobe")]
    Style(StyleArgs),
}

impl EngineCommand {
    fn name(&self) -> &'static str {
        match self {
            EngineCommand::Recommend(_) => "recommend",
            EngineCommand::Analyze(_) => "analyze",
            EngineCommand::Pair(_) => "pair",
            EngineCommand::Suggest(_) => "suggest",
            EngineCommand::Feedback(_) => "feedback",
            EngineCommand::Accuracy(_) => "accuracy",
            EngineCommand::Location(_) => "location",
            EngineCommand::Style(_) => "style",
        }
    }

    fn run(&self, config: &AppConfig, now: DateTime<Utc>) -> CommandResult {
        match self {
            EngineCommand::Recommend(args) => commands::recommend::run(config, args, now),
            EngineCommand::Analyze(args) => commands::analyze::run(config, args, now),
            EngineCommand::Pair(args) => commands::pair::run(config, args, now),
            EngineCommand::Suggest(args) => commands::suggest::run(args),
            EngineCommand::Feedback(args) => commands::feedback::run(config, args, now),
            EngineCommand::Accuracy(args) => commands::accuracy::run(config, args, now),
            EngineCommand::Location(args) => commands::location::run(config, args, now),
            EngineCommand::Style(args) => commands::style::run(config, args, now),
        }
    }
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;
    use wardrobe_core::config::LogFormat::*;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        Compact => builder.compact().init(),
        Pretty => builder.pretty().init(),
        Json => builder.json().init(),
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            CommandResult { exit_code: 0, output: commands::config::run(cli.config.as_deref()) }
        }
        Command::Engine(command) => {
            let options = LoadOptions { config_path: cli.config, ..LoadOptions::default() };
            match AppConfig::load(options) {
                Ok(config) => {
                    init_logging(&config);
                    command.run(&config, Utc::now())
                }
                Err(error) => CommandResult::config_failure(command.name(), error),
            }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
