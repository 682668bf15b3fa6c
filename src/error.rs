//! Error types for LakshyaNav

use thiserror::Error;

/// LakshyaNav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Unknown object category: {0}")]
    UnknownCategory(String),

    #[error("Navigation controller is busy with another command")]
    Busy,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
