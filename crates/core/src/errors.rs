use thiserror::Error;

use crate::config::ConfigError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
    #[error("unknown {entity} `{id}`")]
    UnknownEntity { entity: &'static str, id: String },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl ApplicationError {
    /// Stable machine-readable class used in command outcomes.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::InvariantViolation(_)) => "invalid_input",
            Self::Domain(DomainError::UnknownEntity { .. }) => "unknown_entity",
            Self::Config(_) => "config_validation",
            Self::Persistence(_) => "persistence",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) => "The request could not be processed. Check inputs and try again.",
            Self::Config(_) => "Configuration is invalid. Run `wardrobe config` to inspect it.",
            Self::Persistence(_) => "The wardrobe state could not be read or written.",
        }
    }
}
