use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoError {
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Invalid value for rule {key}: {reason}")]
    InvalidRuleValue { key: String, reason: String },

    #[error("Rule {key} expects a {expected} value")]
    RuleTypeMismatch { key: String, expected: &'static str },

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EcoError>;
