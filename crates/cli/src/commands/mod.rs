pub mod accuracy;
pub mod analyze;
pub mod config;
pub mod feedback;
pub mod location;
pub mod pair;
pub mod recommend;
pub mod style;
pub mod suggest;

use std::path::Path;

use clap::Args;
use serde::Serialize;
use serde_json::Value;
use wardrobe_core::config::AppConfig;
use wardrobe_core::domain::weather::WeatherContext;
use wardrobe_core::errors::{ApplicationError, DomainError};
use wardrobe_core::session::WardrobeSession;

use crate::state::{self, WardrobeState};

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_STATE_LOAD: u8 = 3;
pub const EXIT_STATE_SAVE: u8 = 4;
pub const EXIT_UNKNOWN_ENTITY: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    /// Success carrying a structured payload under `data`.
    pub fn success_with_data(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn config_failure(command: &str, error: impl std::fmt::Display) -> Self {
        Self::failure(command, "config_validation", format!("configuration issue: {error}"), EXIT_CONFIG)
    }

    pub fn state_load_failure(command: &str, error: anyhow::Error) -> Self {
        Self::failure(command, "state_load", format!("{error:#}"), EXIT_STATE_LOAD)
    }

    pub fn state_save_failure(command: &str, error: anyhow::Error) -> Self {
        Self::failure(command, "state_save", format!("{error:#}"), EXIT_STATE_SAVE)
    }

    pub fn unknown_entity(command: &str, entity: &'static str, id: &str) -> Self {
        let error = ApplicationError::from(DomainError::UnknownEntity { entity, id: id.to_string() });
        Self::failure(command, error.class(), error.to_string(), EXIT_UNKNOWN_ENTITY)
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Loads the state file or produces the matching failure result.
pub(crate) fn load_state(command: &str, path: &Path) -> Result<WardrobeState, CommandResult> {
    state::load(path).map_err(|error| CommandResult::state_load_failure(command, error))
}

pub(crate) fn save_state(command: &str, path: &Path, state: &WardrobeState) -> Result<(), CommandResult> {
    state::save(path, state).map_err(|error| CommandResult::state_save_failure(command, error))
}

/// Current weather flags. No temperature means no weather reading.
#[derive(Debug, Clone, Default, Args)]
pub struct WeatherArgs {
    #[arg(long, help = "Current temperature in degrees Celsius")]
    pub temperature: Option<f64>,
    #[arg(long, default_value_t = 0.0, help = "Precipitation as a fraction between 0 and 1")]
    pub precipitation: f64,
    #[arg(long, help = "Human weather description, e.g. \"light rain\"")]
    pub description: Option<String>,
    #[arg(long, default_value_t = 0.0, help = "Wind speed")]
    pub wind_speed: f64,
}

impl WeatherArgs {
    pub fn to_context(&self) -> Option<WeatherContext> {
        let temperature = self.temperature?;
        let mut weather = WeatherContext::new(temperature, self.precipitation).with_wind_speed(self.wind_speed);
        if let Some(description) = &self.description {
            weather = weather.with_description(description.clone());
        }
        Some(weather)
    }
}

/// The state file holds a single user.
pub(crate) const LOCAL_USER: &str = "local";

pub(crate) fn session_for(config: &AppConfig, state: &WardrobeState) -> WardrobeSession {
    WardrobeSession::from_state(LOCAL_USER, state.preferences.clone(), config)
}
