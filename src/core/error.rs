use thiserror::Error;

use crate::core::types::Position;
use crate::entity::item::Item;

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Position out of bounds: ({}, {})", .0.x, .0.y)]
    OutOfBounds(Position),

    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("Insufficient ingredients for {recipe}: missing {missing}")]
    InsufficientIngredients { recipe: String, missing: Item },

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Decision oracle failed: {0}")]
    OracleFailure(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ColonyError>;
