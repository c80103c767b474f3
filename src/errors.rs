use thiserror::Error;

use crate::schedule::EventId;

/// Error type that captures persistence, configuration and lookup failures.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Event not found: {0}")]
    EventNotFound(EventId),
    #[error("Invalid selection: {0}")]
    Selection(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
