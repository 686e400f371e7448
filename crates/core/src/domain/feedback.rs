use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weather::WeatherContext;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Like,
    Dislike,
    Neutral,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Like => "like",
            FeedbackKind::Dislike => "dislike",
            FeedbackKind::Neutral => "neutral",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "like" => Ok(FeedbackKind::Like),
            "dislike" => Ok(FeedbackKind::Dislike),
            "neutral" => Ok(FeedbackKind::Neutral),
            other => Err(DomainError::InvariantViolation(format!(
                "unsupported feedback `{other}` (expected like|dislike|neutral)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackContext {
    pub occasion: Option<String>,
    pub weather: Option<WeatherContext>,
    pub mood: Option<String>,
}

/// One like/dislike/neutral reaction. History is append-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEvent {
    pub item_id: String,
    #[serde(default)]
    pub outfit_id: Option<String>,
    pub feedback: FeedbackKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub context: FeedbackContext,
}

impl FeedbackEvent {
    pub fn new(item_id: impl Into<String>, feedback: FeedbackKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            outfit_id: None,
            feedback,
            timestamp,
            context: FeedbackContext::default(),
        }
    }

    pub fn for_outfit(mut self, outfit_id: impl Into<String>) -> Self {
        self.outfit_id = Some(outfit_id.into());
        self
    }

    pub fn with_context(mut self, context: FeedbackContext) -> Self {
        self.context = context;
        self
    }
}
