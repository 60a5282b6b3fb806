use thiserror::Error;

use crate::core::types::{PlayerId, StarId};

#[derive(Error, Debug)]
pub enum ReachError {
    #[error("Star not found: {0:?}")]
    StarNotFound(StarId),

    #[error("Player not found: {0:?}")]
    PlayerNotFound(PlayerId),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ReachError>;
