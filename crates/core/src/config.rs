use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::ClimateThresholds;
use crate::recommendation::{ScoringWeights, DEFAULT_LIMIT, DEFAULT_MAX_REASONS, DEFAULT_WEIGHTS};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub recommendation: RecommendationConfig,
    pub weights: ScoringWeights,
    pub learning: LearningConfig,
    pub climate: ClimateThresholds,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct RecommendationConfig {
    pub default_limit: usize,
    pub max_reasons: usize,
}

#[derive(Clone, Debug)]
pub struct LearningConfig {
    pub learning_rate: f64,
    pub accuracy_window_days: i64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub default_limit: Option<usize>,
    pub learning_rate: Option<f64>,
    pub weights: Option<ScoringWeights>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recommendation: RecommendationConfig {
                default_limit: DEFAULT_LIMIT,
                max_reasons: DEFAULT_MAX_REASONS,
            },
            weights: DEFAULT_WEIGHTS,
            learning: LearningConfig {
                learning_rate: crate::learning::DEFAULT_LEARNING_RATE,
                accuracy_window_days: crate::learning::DEFAULT_ACCURACY_WINDOW_DAYS,
            },
            climate: ClimateThresholds::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("wardrobe.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(recommendation) = patch.recommendation {
            if let Some(default_limit) = recommendation.default_limit {
                self.recommendation.default_limit = default_limit;
            }
            if let Some(max_reasons) = recommendation.max_reasons {
                self.recommendation.max_reasons = max_reasons;
            }
        }

        if let Some(weights) = patch.weights {
            if let Some(style) = weights.style {
                self.weights.style = style;
            }
            if let Some(weather) = weights.weather {
                self.weights.weather = weather;
            }
            if let Some(occasion) = weights.occasion {
                self.weights.occasion = occasion;
            }
            if let Some(location) = weights.location {
                self.weights.location = location;
            }
        }

        if let Some(learning) = patch.learning {
            if let Some(learning_rate) = learning.learning_rate {
                self.learning.learning_rate = learning_rate;
            }
            if let Some(accuracy_window_days) = learning.accuracy_window_days {
                self.learning.accuracy_window_days = accuracy_window_days;
            }
        }

        if let Some(climate) = patch.climate {
            if let Some(cold_below) = climate.cold_below {
                self.climate.cold_below = cold_below;
            }
            if let Some(temperate_below) = climate.temperate_below {
                self.climate.temperate_below = temperate_below;
            }
            if let Some(warm_below) = climate.warm_below {
                self.climate.warm_below = warm_below;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("WARDROBE_RECOMMENDATION_DEFAULT_LIMIT") {
            self.recommendation.default_limit =
                parse_usize("WARDROBE_RECOMMENDATION_DEFAULT_LIMIT", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_RECOMMENDATION_MAX_REASONS") {
            self.recommendation.max_reasons =
                parse_usize("WARDROBE_RECOMMENDATION_MAX_REASONS", &value)?;
        }

        if let Some(value) = read_env("WARDROBE_WEIGHTS_STYLE") {
            self.weights.style = parse_f64("WARDROBE_WEIGHTS_STYLE", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_WEIGHTS_WEATHER") {
            self.weights.weather = parse_f64("WARDROBE_WEIGHTS_WEATHER", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_WEIGHTS_OCCASION") {
            self.weights.occasion = parse_f64("WARDROBE_WEIGHTS_OCCASION", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_WEIGHTS_LOCATION") {
            self.weights.location = parse_f64("WARDROBE_WEIGHTS_LOCATION", &value)?;
        }

        if let Some(value) = read_env("WARDROBE_LEARNING_RATE") {
            self.learning.learning_rate = parse_f64("WARDROBE_LEARNING_RATE", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_LEARNING_ACCURACY_WINDOW_DAYS") {
            self.learning.accuracy_window_days =
                parse_i64("WARDROBE_LEARNING_ACCURACY_WINDOW_DAYS", &value)?;
        }

        if let Some(value) = read_env("WARDROBE_CLIMATE_COLD_BELOW") {
            self.climate.cold_below = parse_f64("WARDROBE_CLIMATE_COLD_BELOW", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_CLIMATE_TEMPERATE_BELOW") {
            self.climate.temperate_below = parse_f64("WARDROBE_CLIMATE_TEMPERATE_BELOW", &value)?;
        }
        if let Some(value) = read_env("WARDROBE_CLIMATE_WARM_BELOW") {
            self.climate.warm_below = parse_f64("WARDROBE_CLIMATE_WARM_BELOW", &value)?;
        }

        let log_level =
            read_env("WARDROBE_LOGGING_LEVEL").or_else(|| read_env("WARDROBE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("WARDROBE_LOGGING_FORMAT").or_else(|| read_env("WARDROBE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(default_limit) = overrides.default_limit {
            self.recommendation.default_limit = default_limit;
        }
        if let Some(learning_rate) = overrides.learning_rate {
            self.learning.learning_rate = learning_rate;
        }
        if let Some(weights) = overrides.weights {
            self.weights = weights;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_recommendation(&self.recommendation)?;
        validate_weights(&self.weights)?;
        validate_learning(&self.learning)?;
        validate_climate(&self.climate)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("wardrobe.toml"), PathBuf::from("config/wardrobe.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_recommendation(recommendation: &RecommendationConfig) -> Result<(), ConfigError> {
    if recommendation.default_limit == 0 {
        return Err(ConfigError::Validation(
            "recommendation.default_limit must be greater than zero".to_string(),
        ));
    }
    if recommendation.max_reasons == 0 {
        return Err(ConfigError::Validation(
            "recommendation.max_reasons must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_weights(weights: &ScoringWeights) -> Result<(), ConfigError> {
    let all = [
        ("weights.style", weights.style),
        ("weights.weather", weights.weather),
        ("weights.occasion", weights.occasion),
        ("weights.location", weights.location),
    ];

    if let Some((name, _)) = all.iter().find(|(_, value)| !value.is_finite() || *value < 0.0) {
        return Err(ConfigError::Validation(format!(
            "{name} must be a finite, non-negative number"
        )));
    }

    if all.iter().map(|(_, value)| value).sum::<f64>() <= 0.0 {
        return Err(ConfigError::Validation(
            "at least one scoring weight must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_learning(learning: &LearningConfig) -> Result<(), ConfigError> {
    if !(learning.learning_rate > 0.0 && learning.learning_rate <= 1.0) {
        return Err(ConfigError::Validation(
            "learning.learning_rate must be in range (0, 1]".to_string(),
        ));
    }
    if learning.accuracy_window_days <= 0 {
        return Err(ConfigError::Validation(
            "learning.accuracy_window_days must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_climate(climate: &ClimateThresholds) -> Result<(), ConfigError> {
    let ascending = climate.cold_below < climate.temperate_below
        && climate.temperate_below < climate.warm_below;
    if !ascending {
        return Err(ConfigError::Validation(
            "climate thresholds must satisfy cold_below < temperate_below < warm_below"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_i64(key: &str, value: &str) -> Result<i64, ConfigError> {
    value.trim().parse::<i64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    recommendation: Option<RecommendationPatch>,
    weights: Option<WeightsPatch>,
    learning: Option<LearningPatch>,
    climate: Option<ClimatePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationPatch {
    default_limit: Option<usize>,
    max_reasons: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct WeightsPatch {
    style: Option<f64>,
    weather: Option<f64>,
    occasion: Option<f64>,
    location: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LearningPatch {
    learning_rate: Option<f64>,
    accuracy_window_days: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ClimatePatch {
    cold_below: Option<f64>,
    temperate_below: Option<f64>,
    warm_below: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
