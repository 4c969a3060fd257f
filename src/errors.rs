use thiserror::Error;

/// Error type that captures the failure modes of the subscription core.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid cycle configuration: {0}")]
    InvalidCycleConfiguration(String),
    #[error("Invalid subscription: {0}")]
    InvalidSubscription(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
