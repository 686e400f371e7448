use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;
use wardrobe_core::config::{AppConfig, LoadOptions};

/// (key path, env var, alias env var)
const FIELDS: &[(&str, &str, Option<&str>)] = &[
    ("recommendation.default_limit", "WARDROBE_RECOMMENDATION_DEFAULT_LIMIT", None),
    ("recommendation.max_reasons", "WARDROBE_RECOMMENDATION_MAX_REASONS", None),
    ("weights.style", "WARDROBE_WEIGHTS_STYLE", None),
    ("weights.weather", "WARDROBE_WEIGHTS_WEATHER", None),
    ("weights.occasion", "WARDROBE_WEIGHTS_OCCASION", None),
    ("weights.location", "WARDROBE_WEIGHTS_LOCATION", None),
    ("learning.learning_rate", "WARDROBE_LEARNING_RATE", None),
    ("learning.accuracy_window_days", "WARDROBE_LEARNING_ACCURACY_WINDOW_DAYS", None),
    ("climate.cold_below", "WARDROBE_CLIMATE_COLD_BELOW", None),
    ("climate.temperate_below", "WARDROBE_CLIMATE_TEMPERATE_BELOW", None),
    ("climate.warm_below", "WARDROBE_CLIMATE_WARM_BELOW", None),
    ("logging.level", "WARDROBE_LOGGING_LEVEL", Some("WARDROBE_LOG_LEVEL")),
    ("logging.format", "WARDROBE_LOGGING_FORMAT", Some("WARDROBE_LOG_FORMAT")),
];

pub fn run(config_path: Option<&Path>) -> String {
    let options = LoadOptions { config_path: config_path.map(Path::to_path_buf), ..LoadOptions::default() };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path(config_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key_path, env_key, alias) in FIELDS {
        lines.push(render_line(
            key_path,
            &field_value(&config, key_path),
            field_source(
                key_path,
                &[Some(*env_key), *alias],
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            ),
        ));
    }

    lines.join("\n")
}

fn field_value(config: &AppConfig, key_path: &str) -> String {
    match key_path {
        "recommendation.default_limit" => config.recommendation.default_limit.to_string(),
        "recommendation.max_reasons" => config.recommendation.max_reasons.to_string(),
        "weights.style" => config.weights.style.to_string(),
        "weights.weather" => config.weights.weather.to_string(),
        "weights.occasion" => config.weights.occasion.to_string(),
        "weights.location" => config.weights.location.to_string(),
        "learning.learning_rate" => config.learning.learning_rate.to_string(),
        "learning.accuracy_window_days" => config.learning.accuracy_window_days.to_string(),
        "climate.cold_below" => config.climate.cold_below.to_string(),
        "climate.temperate_below" => config.climate.temperate_below.to_string(),
        "climate.warm_below" => config.climate.warm_below.to_string(),
        "logging.level" => config.logging.level.clone(),
        "logging.format" => format!("{:?}", config.logging.format),
        _ => "<unknown>".to_string(),
    }
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("wardrobe.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/wardrobe.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[Option<&str>],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    for env_key in env_keys.iter().flatten() {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
