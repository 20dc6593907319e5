use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Transition not valid in current phase: {0}")]
    InvalidPhase(String),

    #[error("An action is already being resolved")]
    ResolutionInFlight,

    #[error("Action text is empty")]
    EmptyAction,

    #[error("Narration error: {0}")]
    NarrationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
