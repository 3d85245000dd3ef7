use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Segment fetch error: {0}")]
    Segments(String),

    #[error("Player capability unavailable: {0}")]
    Capability(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
