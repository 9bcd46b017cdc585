use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Preferences error: {0}")]
    Preferences(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
